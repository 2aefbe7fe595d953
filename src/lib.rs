//! QuizPal Telegram Bot
//!
//! A Telegram bot for a pub-quiz club: browsing upcoming games, team
//! registration and player signup, post-game results and the winner lottery,
//! with reminder delivery and a small inbound API for sibling services.

#![allow(non_snake_case)]

pub mod api;
pub mod backend;
pub mod config;
pub mod facades;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod reminders;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{QuizPalError, Result};

// Re-export main components for easy access
pub use facades::FacadeFactory;
pub use i18n::I18n;
pub use state::StateStorage;
pub use storage::RequestStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
