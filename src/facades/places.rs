//! Places facade
//!
//! Place lookups are memoized by ID, same shape as the leagues memo.

use std::collections::HashMap;
use std::sync::Arc;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::BackendClient;
use crate::models::Place;
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PlacesFacade {
    client: BackendClient,
    cache: Arc<RwLock<HashMap<i64, Place>>>,
}

impl PlacesFacade {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch one place by ID, memoized
    pub async fn get(&self, place_id: i64) -> Result<Place> {
        if let Some(place) = self.cache.read().await.get(&place_id) {
            debug!(place_id = place_id, "Place served from memo");
            return Ok(place.clone());
        }

        let dto: PlaceDto = self
            .client
            .get(&format!("/v1/places/{}", place_id))
            .await
            .map_err(|e| translate(e, place_id))?;

        let place = map_place(dto);
        self.cache.write().await.insert(place_id, place.clone());
        Ok(place)
    }
}

fn map_place(dto: PlaceDto) -> Place {
    Place {
        id: dto.id,
        name: dto.name,
        address: dto.address,
        latitude: dto.lat,
        longitude: dto.lon,
    }
}

fn translate(err: BackendError, place_id: i64) -> QuizPalError {
    match err.reason() {
        Some("place_not_found") => QuizPalError::PlaceNotFound { place_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_mapping() {
        let dto = PlaceDto {
            id: 3,
            name: "Pub on the Corner".to_string(),
            address: "1 Main St".to_string(),
            lat: Some(55.75),
            lon: Some(37.61),
        };
        let place = map_place(dto);
        assert!(place.has_coordinates());
        assert_eq!(place.address, "1 Main St");
    }
}
