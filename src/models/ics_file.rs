//! ICS calendar file model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcsFile {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub url: String,
}
