//! Games facade
//!
//! Thin wrapper over the gateway game service: DTO to model mapping and
//! error-reason translation only.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::backend::BackendClient;
use crate::models::Game;
use crate::utils::errors::{BackendError, QuizPalError, Result};

/// Game record as the gateway reports it
#[derive(Debug, Clone, Deserialize)]
pub struct GameDto {
    pub id: i64,
    pub league_id: i64,
    pub place_id: i64,
    pub number: String,
    pub title: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub price: u32,
    pub is_registered: bool,
    pub free_slots: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamesPageDto {
    pub games: Vec<GameDto>,
    pub total: u32,
}

#[derive(Debug, Serialize)]
struct RegistrationBody {
    game_id: i64,
}

/// A page of upcoming games
#[derive(Debug, Clone)]
pub struct GamesPage {
    pub games: Vec<Game>,
    pub total: u32,
}

#[derive(Debug, Clone)]
pub struct GamesFacade {
    client: BackendClient,
}

impl GamesFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// List upcoming games, paginated
    pub async fn list_upcoming(&self, page: u32, page_size: u32) -> Result<GamesPage> {
        debug!(page = page, "Listing upcoming games");

        let dto: GamesPageDto = self
            .client
            .get_with_query(
                "/v1/games",
                &[
                    ("status", "upcoming".to_string()),
                    ("page", page.to_string()),
                    ("page_size", page_size.to_string()),
                ],
            )
            .await
            .map_err(QuizPalError::Backend)?;

        Ok(GamesPage {
            games: dto.games.into_iter().map(map_game).collect(),
            total: dto.total,
        })
    }

    /// Fetch one game by ID
    pub async fn get(&self, game_id: i64) -> Result<Game> {
        let dto: GameDto = self
            .client
            .get(&format!("/v1/games/{}", game_id))
            .await
            .map_err(|e| translate(e, game_id))?;

        Ok(map_game(dto))
    }

    /// Register the club team for a game
    pub async fn register(&self, game_id: i64) -> Result<()> {
        self.client
            .post_empty(
                &format!("/v1/games/{}/registration", game_id),
                &RegistrationBody { game_id },
            )
            .await
            .map_err(|e| translate(e, game_id))
    }

    /// Roll back the club team registration for a game
    pub async fn unregister(&self, game_id: i64) -> Result<()> {
        self.client
            .delete(&format!("/v1/games/{}/registration", game_id))
            .await
            .map_err(|e| translate(e, game_id))
    }

    /// Search upcoming games by league or place name
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Game>> {
        let dto: GamesPageDto = self
            .client
            .get_with_query(
                "/v1/games/search",
                &[
                    ("query", query.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
            .map_err(QuizPalError::Backend)?;

        Ok(dto.games.into_iter().map(map_game).collect())
    }
}

fn map_game(dto: GameDto) -> Game {
    Game {
        id: dto.id,
        league_id: dto.league_id,
        place_id: dto.place_id,
        number: dto.number,
        name: dto.title,
        date: dto.starts_at,
        price: dto.price,
        registered: dto.is_registered,
        free_slots: dto.free_slots,
    }
}

fn translate(err: BackendError, game_id: i64) -> QuizPalError {
    match err.reason() {
        Some("game_not_found") => QuizPalError::GameNotFound { game_id },
        Some("game_has_passed") => QuizPalError::GameHasPassed { game_id },
        Some("already_registered") => QuizPalError::AlreadyRegistered { game_id },
        Some("not_registered") => QuizPalError::NotRegistered { game_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_dto_mapping() {
        let json = r#"{
            "id": 5, "league_id": 2, "place_id": 3, "number": "42.1",
            "title": null, "starts_at": "2024-06-01T19:30:00Z",
            "price": 400, "is_registered": true, "free_slots": 2
        }"#;
        let dto: GameDto = serde_json::from_str(json).unwrap();
        let game = map_game(dto);
        assert_eq!(game.id, 5);
        assert_eq!(game.number, "42.1");
        assert!(game.registered);
        assert_eq!(game.free_slots, Some(2));
    }

    #[test]
    fn test_reason_translation() {
        let err = BackendError::Rejected {
            reason: "game_not_found".to_string(),
            message: "no such game".to_string(),
        };
        assert!(matches!(
            translate(err, 9),
            QuizPalError::GameNotFound { game_id: 9 }
        ));

        let err = BackendError::Rejected {
            reason: "quota_exceeded".to_string(),
            message: "try later".to_string(),
        };
        assert!(matches!(translate(err, 9), QuizPalError::Backend(_)));
    }
}
