//! Request store
//!
//! Persists serialized callback payloads keyed by UUID, with an in-memory
//! cache mirroring lookups. Telegram callback data only carries the UUID.

use std::collections::HashMap;
use std::sync::Arc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{CallbackCommand, Request};
use crate::utils::errors::{QuizPalError, Result};

#[derive(Clone)]
pub struct RequestStore {
    pool: PgPool,
    // uuid -> (group_uuid, command); mirrors the SQL table for hot lookups
    cache: Arc<RwLock<HashMap<Uuid, (Uuid, CallbackCommand)>>>,
}

impl RequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Persist a callback command under a fresh UUID within the given
    /// keyboard group; returns the UUID to embed into callback data
    pub async fn register(&self, group_uuid: Uuid, command: &CallbackCommand) -> Result<Uuid> {
        let uuid = Uuid::new_v4();
        let body = serde_json::to_value(command)?;

        sqlx::query(
            "INSERT INTO requests (group_uuid, uuid, body) VALUES ($1, $2, $3)"
        )
        .bind(group_uuid)
        .bind(uuid)
        .bind(&body)
        .execute(&self.pool)
        .await?;

        self.cache
            .write()
            .await
            .insert(uuid, (group_uuid, command.clone()));

        debug!(uuid = %uuid, group_uuid = %group_uuid, command = command.name(), "Callback request registered");
        Ok(uuid)
    }

    /// Look up a stored callback command and its keyboard group, cache
    /// first then SQL
    pub async fn find(&self, uuid: Uuid) -> Result<Option<(Uuid, CallbackCommand)>> {
        if let Some((group, command)) = self.cache.read().await.get(&uuid) {
            debug!(uuid = %uuid, "Callback request served from cache");
            return Ok(Some((*group, command.clone())));
        }

        let row: Option<Request> = sqlx::query_as::<_, Request>(
            "SELECT id, group_uuid, uuid, body, created_at FROM requests WHERE uuid = $1"
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        match serde_json::from_value::<CallbackCommand>(row.body) {
            Ok(command) => {
                self.cache
                    .write()
                    .await
                    .insert(uuid, (row.group_uuid, command.clone()));
                Ok(Some((row.group_uuid, command)))
            }
            Err(e) => {
                // A malformed body means a schema drift; drop the row so the
                // button expires instead of failing forever.
                warn!(uuid = %uuid, error = %e, "Malformed stored callback payload, deleting");
                self.delete_group(row.group_uuid).await?;
                Ok(None)
            }
        }
    }

    /// Delete all requests of one keyboard group and purge the cache
    pub async fn delete_group(&self, group_uuid: Uuid) -> Result<u64> {
        let deleted = sqlx::query("DELETE FROM requests WHERE group_uuid = $1")
            .bind(group_uuid)
            .execute(&self.pool)
            .await?
            .rows_affected();

        self.evict_group(group_uuid).await;

        debug!(group_uuid = %group_uuid, deleted = deleted, "Callback request group deleted");
        Ok(deleted)
    }

    /// Drop every cached entry of one keyboard group
    async fn evict_group(&self, group_uuid: Uuid) {
        self.cache
            .write()
            .await
            .retain(|_, (group, _)| *group != group_uuid);
    }

    /// Drop requests older than the given number of days
    pub async fn purge_older_than(&self, days: i64) -> Result<u64> {
        let deleted = sqlx::query(
            "DELETE FROM requests WHERE created_at < now() - ($1 || ' days')::interval"
        )
        .bind(days.to_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            self.cache.write().await.clear();
        }

        Ok(deleted)
    }

    /// Parse the callback-data string Telegram round-trips back to us
    pub fn parse_callback_data(data: &str) -> Result<Uuid> {
        Uuid::parse_str(data).map_err(|_| QuizPalError::RequestNotFound {
            uuid: data.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // A lazy pool opens no connection until a query runs, so cache-only
    // paths can be exercised without a live database.
    fn detached_store() -> RequestStore {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/unreachable")
            .unwrap();
        RequestStore::new(pool)
    }

    #[tokio::test]
    async fn test_find_serves_cached_entry_without_sql() {
        let store = detached_store();
        let group = Uuid::new_v4();
        let uuid = Uuid::new_v4();
        store
            .cache
            .write()
            .await
            .insert(uuid, (group, CallbackCommand::GamesList { page: 2 }));

        let found = store.find(uuid).await.unwrap();
        assert_eq!(found, Some((group, CallbackCommand::GamesList { page: 2 })));
    }

    #[tokio::test]
    async fn test_evict_group_drops_only_siblings() {
        let store = detached_store();
        let group_a = Uuid::new_v4();
        let group_b = Uuid::new_v4();
        let a1 = Uuid::new_v4();
        let a2 = Uuid::new_v4();
        let b1 = Uuid::new_v4();
        {
            let mut cache = store.cache.write().await;
            cache.insert(a1, (group_a, CallbackCommand::GameCard { game_id: 1 }));
            cache.insert(a2, (group_a, CallbackCommand::GamesList { page: 0 }));
            cache.insert(b1, (group_b, CallbackCommand::Settings));
        }

        store.evict_group(group_a).await;

        let cache = store.cache.read().await;
        assert!(!cache.contains_key(&a1));
        assert!(!cache.contains_key(&a2));
        assert!(cache.contains_key(&b1));
    }

    #[test]
    fn test_parse_callback_data() {
        let uuid = Uuid::new_v4();
        assert_eq!(
            RequestStore::parse_callback_data(&uuid.to_string()).unwrap(),
            uuid
        );
        assert!(RequestStore::parse_callback_data("games:list:1").is_err());
    }

    #[test]
    fn test_callback_data_fits_telegram_limit() {
        // Telegram caps callback data at 64 bytes; a canonical UUID is 36.
        let uuid = Uuid::new_v4().to_string();
        assert!(uuid.len() <= 64);
    }
}
