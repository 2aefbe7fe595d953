//! Game result model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: i64,
    /// Final placement of the team, 1-based
    pub place: u32,
    pub points: i32,
    /// Per-round points as reported by the backend, e.g. "5/4/6/3"
    pub round_points: Option<String>,
}
