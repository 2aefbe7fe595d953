//! Deferred callback request model
//!
//! Telegram limits callback data to 64 bytes, so inline-button payloads are
//! persisted out-of-band and referenced by UUID. `Request` is the stored row;
//! `CallbackCommand` is the payload serialized into its body.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::game_player::Degree;

/// A stored callback payload row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Request {
    pub id: i64,
    /// All buttons of one keyboard share a group UUID so the whole
    /// keyboard can be invalidated at once
    pub group_uuid: Uuid,
    pub uuid: Uuid,
    pub body: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// The command dispatch table: every inline button resolves to one of these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CallbackCommand {
    GamesList { page: u32 },
    GameCard { game_id: i64 },
    RegisterGame { game_id: i64 },
    UnregisterGame { game_id: i64 },
    RegisterPlayer { game_id: i64, degree: Degree },
    UnregisterPlayer { game_id: i64 },
    PlayersList { game_id: i64 },
    Venue { place_id: i64 },
    GetIcsFile { game_id: i64 },
    GamePhotos { game_id: i64, index: u32 },
    GameResult { game_id: i64 },
    Lottery { game_id: i64 },
    MathProblem { game_id: i64 },
    CertificatesList,
    CertificateCard { certificate_id: i64 },
    Settings,
    ChangeEmail,
    ChangeName,
    ChangePhone,
    Cancel,
}

impl CallbackCommand {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            CallbackCommand::GamesList { .. } => "games_list",
            CallbackCommand::GameCard { .. } => "game_card",
            CallbackCommand::RegisterGame { .. } => "register_game",
            CallbackCommand::UnregisterGame { .. } => "unregister_game",
            CallbackCommand::RegisterPlayer { .. } => "register_player",
            CallbackCommand::UnregisterPlayer { .. } => "unregister_player",
            CallbackCommand::PlayersList { .. } => "players_list",
            CallbackCommand::Venue { .. } => "venue",
            CallbackCommand::GetIcsFile { .. } => "get_ics_file",
            CallbackCommand::GamePhotos { .. } => "game_photos",
            CallbackCommand::GameResult { .. } => "game_result",
            CallbackCommand::Lottery { .. } => "lottery",
            CallbackCommand::MathProblem { .. } => "math_problem",
            CallbackCommand::CertificatesList => "certificates_list",
            CallbackCommand::CertificateCard { .. } => "certificate_card",
            CallbackCommand::Settings => "settings",
            CallbackCommand::ChangeEmail => "change_email",
            CallbackCommand::ChangeName => "change_name",
            CallbackCommand::ChangePhone => "change_phone",
            CallbackCommand::Cancel => "cancel",
        }
    }

    /// Whether handling this command consumes the whole keyboard group.
    ///
    /// Registration state changes invalidate sibling buttons on the same
    /// message, so the entire group is deleted from the request store.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            CallbackCommand::RegisterGame { .. }
                | CallbackCommand::UnregisterGame { .. }
                | CallbackCommand::RegisterPlayer { .. }
                | CallbackCommand::UnregisterPlayer { .. }
                | CallbackCommand::Lottery { .. }
        )
    }
}
