//! Pending-input context
//!
//! The settings flow parks a marker for the value the user is about to type
//! (e-mail, name or phone); the next plain-text message consumes it.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Which profile field the next text message updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingInput {
    Email,
    Name,
    Phone,
}

impl PendingInput {
    /// i18n key of the prompt asking the user for this value
    pub fn prompt_key(&self) -> &'static str {
        match self {
            PendingInput::Email => "settings.prompts.email",
            PendingInput::Name => "settings.prompts.name",
            PendingInput::Phone => "settings.prompts.phone",
        }
    }
}

/// Stored per-user conversation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingContext {
    pub user_id: i64,
    pub pending: PendingInput,
    pub created_at: DateTime<Utc>,
}

impl PendingContext {
    pub fn new(user_id: i64, pending: PendingInput) -> Self {
        Self {
            user_id,
            pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_input_serialization() {
        let ctx = PendingContext::new(10, PendingInput::Email);
        let json = serde_json::to_string(&ctx).unwrap();
        let parsed: PendingContext = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pending, PendingInput::Email);
        assert_eq!(parsed.user_id, 10);
    }
}
