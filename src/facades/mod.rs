//! Facades module
//!
//! One thin facade per backend resource. Each wraps the shared gateway
//! client, doing DTO to model field mapping and error-code translation only.

pub mod games;
pub mod leagues;
pub mod places;
pub mod users;
pub mod game_players;
pub mod game_results;
pub mod certificates;
pub mod photos;
pub mod ics_files;
pub mod math_problems;

pub use games::{GamesFacade, GamesPage};
pub use leagues::LeaguesFacade;
pub use places::PlacesFacade;
pub use users::UsersFacade;
pub use game_players::GamePlayersFacade;
pub use game_results::GameResultsFacade;
pub use certificates::CertificatesFacade;
pub use photos::PhotosFacade;
pub use ics_files::IcsFilesFacade;
pub use math_problems::MathProblemsFacade;

use crate::backend::BackendClient;
use crate::config::Settings;
use crate::services::NotificationService;
use crate::utils::errors::Result;
use teloxide::Bot;

/// Factory bundling all facades plus the notification service for
/// dependency injection into handlers
#[derive(Clone)]
pub struct FacadeFactory {
    pub games: GamesFacade,
    pub leagues: LeaguesFacade,
    pub places: PlacesFacade,
    pub users: UsersFacade,
    pub game_players: GamePlayersFacade,
    pub game_results: GameResultsFacade,
    pub certificates: CertificatesFacade,
    pub photos: PhotosFacade,
    pub ics_files: IcsFilesFacade,
    pub math_problems: MathProblemsFacade,
    pub notification: NotificationService,
}

impl FacadeFactory {
    /// Create a new FacadeFactory with all facades initialized over one
    /// shared gateway client
    pub fn new(bot: Bot, settings: &Settings) -> Result<Self> {
        let client = BackendClient::new(&settings.backend)?;

        Ok(Self {
            games: GamesFacade::new(client.clone()),
            leagues: LeaguesFacade::new(client.clone()),
            places: PlacesFacade::new(client.clone()),
            users: UsersFacade::new(client.clone()),
            game_players: GamePlayersFacade::new(client.clone()),
            game_results: GameResultsFacade::new(client.clone()),
            certificates: CertificatesFacade::new(client.clone()),
            photos: PhotosFacade::new(client.clone()),
            ics_files: IcsFilesFacade::new(client.clone()),
            math_problems: MathProblemsFacade::new(client),
            notification: NotificationService::new(bot),
        })
    }
}
