//! ICS files facade
//!
//! Wraps the ICS-file-manager service: one calendar file per game.

use serde::Deserialize;

use crate::backend::BackendClient;
use crate::models::IcsFile;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct IcsFileDto {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct IcsFilesFacade {
    client: BackendClient,
}

impl IcsFilesFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Fetch the calendar file for a game
    pub async fn get_by_game(&self, game_id: i64) -> Result<IcsFile> {
        let dto: IcsFileDto = self
            .client
            .get(&format!("/v1/games/{}/ics", game_id))
            .await
            .map_err(|e| translate(e, game_id))?;

        Ok(IcsFile {
            id: dto.id,
            game_id: dto.game_id,
            name: dto.name,
            url: dto.url,
        })
    }
}

fn translate(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("ics_not_found") => QuizPalError::IcsFileNotFound { game_id },
        _ => QuizPalError::Backend(err),
    }
}
