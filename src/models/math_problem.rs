//! Math problem model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathProblem {
    pub id: i64,
    pub game_id: i64,
    pub text: String,
}
