//! Pending-input state persistence
//!
//! This module handles persistence of the settings-flow pending input using
//! Redis, including serialization, expiration, and cleanup.

use redis::AsyncCommands;
use tracing::{debug, error};

use crate::config::RedisConfig;
use crate::utils::errors::Result;
use super::context::{PendingContext, PendingInput};

/// Redis-based state storage manager
#[derive(Clone)]
pub struct StateStorage {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl StateStorage {
    /// Create a new state storage instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Park a pending input for a user, with TTL
    pub async fn set_pending(&self, user_id: i64, pending: PendingInput) -> Result<()> {
        let key = self.context_key(user_id);
        let context = PendingContext::new(user_id, pending);
        let serialized = serde_json::to_string(&context)?;

        let mut conn = self.connection_manager.clone();
        conn.set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds)
            .await?;

        debug!(user_id = user_id, pending = ?pending, "Pending input parked");
        Ok(())
    }

    /// Load the pending input of a user, if any
    pub async fn get_pending(&self, user_id: i64) -> Result<Option<PendingInput>> {
        let key = self.context_key(user_id);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        let Some(data) = serialized else {
            return Ok(None);
        };

        match serde_json::from_str::<PendingContext>(&data) {
            Ok(context) => Ok(Some(context.pending)),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to deserialize pending context, clearing");
                self.clear_pending(user_id).await?;
                Ok(None)
            }
        }
    }

    /// Clear the pending input of a user
    pub async fn clear_pending(&self, user_id: i64) -> Result<()> {
        let key = self.context_key(user_id);
        let mut conn = self.connection_manager.clone();
        conn.del::<_, ()>(&key).await?;

        debug!(user_id = user_id, "Pending input cleared");
        Ok(())
    }

    fn context_key(&self, user_id: i64) -> String {
        format!("{}state:pending:{}", self.config.prefix, user_id)
    }
}
