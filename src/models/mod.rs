//! Data models
//!
//! Plain value records mirrored from the upstream registration schema, plus
//! the locally persisted callback request.

pub mod game;
pub mod league;
pub mod place;
pub mod user;
pub mod game_player;
pub mod game_result;
pub mod certificate;
pub mod math_problem;
pub mod ics_file;
pub mod request;

pub use game::Game;
pub use league::League;
pub use place::Place;
pub use user::{User, CreateUserRequest, UpdateUserRequest};
pub use game_player::{GamePlayer, Degree};
pub use game_result::GameResult;
pub use certificate::Certificate;
pub use math_problem::MathProblem;
pub use ics_file::IcsFile;
pub use request::{Request, CallbackCommand};
