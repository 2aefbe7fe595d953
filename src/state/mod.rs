//! State management module
//!
//! Redis-backed pending-input state for the settings flow.

pub mod context;
pub mod storage;

pub use context::{PendingContext, PendingInput};
pub use storage::StateStorage;
