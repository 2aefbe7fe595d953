//! Error handling for QuizPal
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the QuizPal application
#[derive(Error, Debug)]
pub enum QuizPalError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Backend API error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Sentinels translated from backend error reasons. The upstream service
    // owns the business invariants; we only surface them as chat replies.
    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: i64 },

    #[error("Game has already passed: {game_id}")]
    GameHasPassed { game_id: i64 },

    #[error("Game has not passed yet: {game_id}")]
    GameNotPassed { game_id: i64 },

    #[error("No free slot on game: {game_id}")]
    NoFreeSlot { game_id: i64 },

    #[error("Already registered on game: {game_id}")]
    AlreadyRegistered { game_id: i64 },

    #[error("Not registered on game: {game_id}")]
    NotRegistered { game_id: i64 },

    #[error("User not found: {telegram_id}")]
    UserNotFound { telegram_id: i64 },

    #[error("League not found: {league_id}")]
    LeagueNotFound { league_id: i64 },

    #[error("Place not found: {place_id}")]
    PlaceNotFound { place_id: i64 },

    #[error("Result not found for game: {game_id}")]
    ResultNotFound { game_id: i64 },

    #[error("Certificate not found: {certificate_id}")]
    CertificateNotFound { certificate_id: i64 },

    #[error("No photos for game: {game_id}")]
    PhotosNotFound { game_id: i64 },

    #[error("ICS file not found for game: {game_id}")]
    IcsFileNotFound { game_id: i64 },

    #[error("Math problem not found for game: {game_id}")]
    MathProblemNotFound { game_id: i64 },

    #[error("Lottery is not available for game: {game_id}")]
    LotteryNotAvailable { game_id: i64 },

    #[error("Callback request not found: {uuid}")]
    RequestNotFound { uuid: String },
}

/// Registration gateway specific errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Backend service unavailable")]
    ServiceUnavailable,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend rejected request ({reason}): {message}")]
    Rejected { reason: String, message: String },
}

impl BackendError {
    /// The machine-readable reason from a rejected request, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for QuizPal operations
pub type Result<T> = std::result::Result<T, QuizPalError>;

/// Result type alias for raw gateway calls
pub type BackendResult<T> = std::result::Result<T, BackendError>;

impl QuizPalError {
    /// i18n key of the chat reply for this error, if it has a dedicated one.
    ///
    /// Errors without a key fall back to `messages.errors.generic`.
    pub fn reply_key(&self) -> Option<&'static str> {
        match self {
            QuizPalError::GameNotFound { .. } => Some("messages.errors.game_not_found"),
            QuizPalError::GameHasPassed { .. } => Some("messages.errors.game_has_passed"),
            QuizPalError::GameNotPassed { .. } => Some("messages.errors.game_not_passed"),
            QuizPalError::NoFreeSlot { .. } => Some("messages.errors.no_free_slot"),
            QuizPalError::AlreadyRegistered { .. } => Some("messages.errors.already_registered"),
            QuizPalError::NotRegistered { .. } => Some("messages.errors.not_registered"),
            QuizPalError::UserNotFound { .. } => Some("messages.errors.user_not_found"),
            QuizPalError::ResultNotFound { .. } => Some("messages.errors.result_not_found"),
            QuizPalError::CertificateNotFound { .. } => Some("messages.errors.certificate_not_found"),
            QuizPalError::PhotosNotFound { .. } => Some("messages.errors.no_photos"),
            QuizPalError::IcsFileNotFound { .. } => Some("messages.errors.ics_not_found"),
            QuizPalError::MathProblemNotFound { .. } => Some("messages.errors.math_problem_not_found"),
            QuizPalError::LotteryNotAvailable { .. } => Some("messages.errors.lottery_not_available"),
            QuizPalError::RequestNotFound { .. } => Some("messages.errors.button_expired"),
            QuizPalError::InvalidInput(_) => Some("messages.errors.invalid_input"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_reply_keys() {
        let err = QuizPalError::NoFreeSlot { game_id: 7 };
        assert_eq!(err.reply_key(), Some("messages.errors.no_free_slot"));

        let err = QuizPalError::Config("missing token".to_string());
        assert_eq!(err.reply_key(), None);
    }

    #[test]
    fn test_backend_error_reason() {
        let err = BackendError::Rejected {
            reason: "no_free_slot".to_string(),
            message: "all seats taken".to_string(),
        };
        assert_eq!(err.reason(), Some("no_free_slot"));
        assert_eq!(BackendError::Timeout.reason(), None);
    }
}
