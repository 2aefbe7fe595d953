//! Game players facade
//!
//! Wraps the game-player service: player signup, rollback and listing.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::BackendClient;
use crate::models::{Degree, GamePlayer};
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct GamePlayerDto {
    pub game_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub degree: Degree,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayersListDto {
    pub players: Vec<GamePlayerDto>,
}

#[derive(Debug, Serialize)]
struct SignupBody {
    user_id: i64,
    degree: Degree,
}

#[derive(Debug, Clone)]
pub struct GamePlayersFacade {
    client: BackendClient,
}

impl GamePlayersFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Sign a player up for a game with the given attendance degree
    pub async fn register(&self, game_id: i64, user_id: i64, degree: Degree) -> Result<()> {
        info!(game_id = game_id, user_id = user_id, degree = ?degree, "Registering player");

        self.client
            .post_empty(
                &format!("/v1/games/{}/players", game_id),
                &SignupBody { user_id, degree },
            )
            .await
            .map_err(|e| translate(e, game_id))
    }

    /// Roll back a player's signup
    pub async fn unregister(&self, game_id: i64, user_id: i64) -> Result<()> {
        info!(game_id = game_id, user_id = user_id, "Unregistering player");

        self.client
            .delete(&format!("/v1/games/{}/players/{}", game_id, user_id))
            .await
            .map_err(|e| translate(e, game_id))
    }

    /// List players registered for a game
    pub async fn list(&self, game_id: i64) -> Result<Vec<GamePlayer>> {
        let dto: PlayersListDto = self
            .client
            .get(&format!("/v1/games/{}/players", game_id))
            .await
            .map_err(|e| translate(e, game_id))?;

        Ok(dto.players.into_iter().map(map_player).collect())
    }
}

fn map_player(dto: GamePlayerDto) -> GamePlayer {
    GamePlayer {
        game_id: dto.game_id,
        user_id: dto.user_id,
        first_name: dto.first_name,
        last_name: dto.last_name,
        degree: dto.degree,
    }
}

fn translate(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("game_has_passed") => QuizPalError::GameHasPassed { game_id },
        Some("no_free_slot") => QuizPalError::NoFreeSlot { game_id },
        Some("already_registered") => QuizPalError::AlreadyRegistered { game_id },
        Some("not_registered") => QuizPalError::NotRegistered { game_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_player_list_deserialization() {
        let json = r#"{"players": [
            {"game_id": 1, "user_id": 2, "first_name": "Ada", "last_name": null, "degree": "likely"},
            {"game_id": 1, "user_id": 3, "first_name": "Bob", "last_name": "K", "degree": "unlikely"}
        ]}"#;
        let dto: PlayersListDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.players.len(), 2);
        assert_eq!(dto.players[1].degree, Degree::Unlikely);
    }

    #[test]
    fn test_slot_and_registration_reasons() {
        let err = BackendError::Rejected {
            reason: "no_free_slot".to_string(),
            message: "team is full".to_string(),
        };
        assert_matches!(translate(err, 5), QuizPalError::NoFreeSlot { game_id: 5 });

        let err = BackendError::Rejected {
            reason: "already_registered".to_string(),
            message: "player already on the list".to_string(),
        };
        assert_matches!(translate(err, 5), QuizPalError::AlreadyRegistered { game_id: 5 });
    }
}
