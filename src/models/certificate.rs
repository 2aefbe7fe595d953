//! Certificate model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i64,
    /// Game on which the certificate was won
    pub won_on_game_id: i64,
    pub info: String,
    /// Game on which the certificate was spent, if any
    pub spent_on_game_id: Option<i64>,
}

impl Certificate {
    pub fn is_spent(&self) -> bool {
        self.spent_on_game_id.is_some()
    }
}
