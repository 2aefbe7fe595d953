//! Leagues facade
//!
//! League lookups are memoized by ID in an in-process map. The memo is
//! unbounded with no eviction, the league catalog upstream is tiny and
//! effectively immutable.

use std::collections::HashMap;
use std::sync::Arc;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::BackendClient;
use crate::models::League;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueDto {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LeaguesFacade {
    client: BackendClient,
    cache: Arc<RwLock<HashMap<i64, League>>>,
}

impl LeaguesFacade {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch one league by ID, memoized
    pub async fn get(&self, league_id: i64) -> Result<League> {
        if let Some(league) = self.cache.read().await.get(&league_id) {
            debug!(league_id = league_id, "League served from memo");
            return Ok(league.clone());
        }

        let dto: LeagueDto = self
            .client
            .get(&format!("/v1/leagues/{}", league_id))
            .await
            .map_err(|e| translate(e, league_id))?;

        let league = map_league(dto);
        self.cache.write().await.insert(league_id, league.clone());
        Ok(league)
    }
}

fn map_league(dto: LeagueDto) -> League {
    League {
        id: dto.id,
        name: dto.name,
        short_name: dto.short_name,
    }
}

fn translate(err: BackendError, league_id: i64) -> QuizPalError {
    match err.reason() {
        Some("league_not_found") => QuizPalError::LeagueNotFound { league_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_mapping() {
        let dto = LeagueDto {
            id: 2,
            name: "Main League".to_string(),
            short_name: Some("ML".to_string()),
        };
        let league = map_league(dto);
        assert_eq!(league.id, 2);
        assert_eq!(league.short_name.as_deref(), Some("ML"));
    }

    #[test]
    fn test_not_found_translation() {
        let err = BackendError::Rejected {
            reason: "league_not_found".to_string(),
            message: "gone".to_string(),
        };
        assert!(matches!(
            translate(err, 4),
            QuizPalError::LeagueNotFound { league_id: 4 }
        ));
    }
}
