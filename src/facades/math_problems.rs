//! Math problems facade
//!
//! Wraps the math-problem service: the warm-up problem attached to a game.

use serde::Deserialize;

use crate::backend::BackendClient;
use crate::models::MathProblem;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct MathProblemDto {
    pub id: i64,
    pub game_id: i64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct MathProblemsFacade {
    client: BackendClient,
}

impl MathProblemsFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Fetch the math problem attached to a game
    pub async fn get_by_game(&self, game_id: i64) -> Result<MathProblem> {
        let dto: MathProblemDto = self
            .client
            .get(&format!("/v1/games/{}/math-problem", game_id))
            .await
            .map_err(|e| translate(e, game_id))?;

        Ok(MathProblem {
            id: dto.id,
            game_id: dto.game_id,
            text: dto.text,
        })
    }
}

fn translate(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("math_problem_not_found") => QuizPalError::MathProblemNotFound { game_id },
        _ => QuizPalError::Backend(err),
    }
}
