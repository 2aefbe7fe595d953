//! Game results facade

use serde::Deserialize;

use crate::backend::BackendClient;
use crate::models::GameResult;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct GameResultDto {
    pub game_id: i64,
    pub place: u32,
    pub points: i32,
    pub round_points: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GameResultsFacade {
    client: BackendClient,
}

impl GameResultsFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Fetch the team's result for a passed game
    pub async fn get_by_game(&self, game_id: i64) -> Result<GameResult> {
        let dto: GameResultDto = self
            .client
            .get(&format!("/v1/games/{}/result", game_id))
            .await
            .map_err(|e| translate(e, game_id))?;

        Ok(GameResult {
            game_id: dto.game_id,
            place: dto.place,
            points: dto.points,
            round_points: dto.round_points,
        })
    }
}

fn translate(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("game_not_passed") => QuizPalError::GameNotPassed { game_id },
        Some("result_not_found") => QuizPalError::ResultNotFound { game_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_result_reasons() {
        let err = BackendError::Rejected {
            reason: "game_not_passed".to_string(),
            message: "game is in the future".to_string(),
        };
        assert_matches!(translate(err, 3), QuizPalError::GameNotPassed { game_id: 3 });
    }
}
