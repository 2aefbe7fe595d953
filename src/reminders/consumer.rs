//! Reminder queue consumer
//!
//! Blocks on the Redis reminder list and delivers a text reminder plus the
//! venue pin to every player of the announced game. One payload is handled
//! at a time; a failed send for one player never blocks the others.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::RedisConfig;
use crate::facades::FacadeFactory;
use crate::i18n::I18n;
use crate::utils::errors::Result;
use crate::utils::helpers::format_game_date;
use crate::utils::logging::log_reminder_delivery;

/// BLPOP timeout so the shutdown signal is polled between pops
const POP_TIMEOUT_SECONDS: u64 = 5;

/// One queued reminder, as the scheduler pushes it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub game_id: i64,
    /// Telegram IDs of the players to notify
    pub player_ids: Vec<i64>,
}

pub struct ReminderConsumer {
    connection_manager: redis::aio::ConnectionManager,
    queue: String,
    facades: FacadeFactory,
    i18n: I18n,
    default_language: String,
}

impl ReminderConsumer {
    pub async fn new(
        config: &RedisConfig,
        facades: FacadeFactory,
        i18n: I18n,
        default_language: String,
    ) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            queue: config.reminder_queue.clone(),
            facades,
            i18n,
            default_language,
        })
    }

    /// Consume the queue until the shutdown signal flips
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(queue = %self.queue, "Reminder consumer started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Reminder consumer shutting down");
                        return;
                    }
                }
                popped = self.pop() => {
                    match popped {
                        Ok(Some(payload)) => {
                            if let Err(e) = self.deliver(&payload).await {
                                error!(game_id = payload.game_id, error = %e, "Reminder delivery failed");
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(error = %e, "Failed to pop from reminder queue");
                            tokio::time::sleep(std::time::Duration::from_secs(POP_TIMEOUT_SECONDS)).await;
                        }
                    }
                }
            }
        }
    }

    /// Block for one payload, returning None on timeout
    async fn pop(&mut self) -> Result<Option<ReminderPayload>> {
        let popped: Option<(String, String)> = redis::cmd("BLPOP")
            .arg(&self.queue)
            .arg(POP_TIMEOUT_SECONDS)
            .query_async(&mut self.connection_manager)
            .await?;

        let Some((_, raw)) = popped else {
            return Ok(None);
        };

        match serde_json::from_str::<ReminderPayload>(&raw) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) => {
                // A malformed payload is dropped, the queue must keep moving
                warn!(error = %e, raw = %raw, "Malformed reminder payload dropped");
                Ok(None)
            }
        }
    }

    /// Fan the reminder out to every listed player
    async fn deliver(&self, payload: &ReminderPayload) -> Result<()> {
        let game = self.facades.games.get(payload.game_id).await?;
        let league = self.facades.leagues.get(game.league_id).await?;
        let place = self.facades.places.get(game.place_id).await?;

        let mut params = HashMap::new();
        params.insert("league".to_string(), league.name.clone());
        params.insert("number".to_string(), game.number.clone());
        params.insert("date".to_string(), format_game_date(game.date));
        params.insert("place".to_string(), place.name.clone());
        let text = self
            .i18n
            .t("reminders.text", &self.default_language, Some(&params));

        let mut sent = 0;
        let mut failed = 0;
        for &telegram_id in &payload.player_ids {
            let delivered = async {
                self.facades.notification.send_text(telegram_id, &text).await?;
                self.facades.notification.send_venue(telegram_id, &place).await?;
                Ok::<_, crate::utils::errors::QuizPalError>(())
            }
            .await;

            match delivered {
                Ok(()) => sent += 1,
                Err(e) => {
                    failed += 1;
                    warn!(
                        telegram_id = telegram_id,
                        game_id = payload.game_id,
                        error = %e,
                        "Reminder not delivered to player"
                    );
                }
            }
        }

        log_reminder_delivery(payload.game_id, sent, failed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserialization() {
        let json = r#"{"game_id": 7, "player_ids": [100, 200, 300]}"#;
        let payload: ReminderPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.game_id, 7);
        assert_eq!(payload.player_ids, vec![100, 200, 300]);
    }

    #[test]
    fn test_malformed_payload_rejected() {
        assert!(serde_json::from_str::<ReminderPayload>(r#"{"game_id": "x"}"#).is_err());
    }
}
