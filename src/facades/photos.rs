//! Photos facade
//!
//! Wraps the photo-manager service. Returns plain URL lists; the bot sends
//! them to Telegram by URL.

use serde::Deserialize;

use crate::backend::BackendClient;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct PhotosDto {
    pub urls: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PhotosFacade {
    client: BackendClient,
}

impl PhotosFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// List photo URLs of a game's album
    pub async fn list_by_game(&self, game_id: i64) -> Result<Vec<String>> {
        let dto: PhotosDto = self
            .client
            .get(&format!("/v1/games/{}/photos", game_id))
            .await
            .map_err(|e| translate(e, game_id))?;

        if dto.urls.is_empty() {
            return Err(QuizPalError::PhotosNotFound { game_id });
        }

        Ok(dto.urls)
    }
}

fn translate(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("no_photos") => QuizPalError::PhotosNotFound { game_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_no_photos_translation() {
        let err = BackendError::Rejected {
            reason: "no_photos".to_string(),
            message: "album empty".to_string(),
        };
        assert_matches!(translate(err, 2), QuizPalError::PhotosNotFound { game_id: 2 });
    }
}
