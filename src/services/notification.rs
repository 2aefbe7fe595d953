//! Notification service implementation
//!
//! This service owns outgoing sends that are not replies to an update: the
//! reminder fan-out and the inbound service API both go through it.

use teloxide::{
    Bot,
    prelude::*,
    types::{ChatId, InputFile, Message},
};
use tracing::{debug, error};

use crate::models::Place;
use crate::utils::errors::{QuizPalError, Result};

/// Outgoing message service shared by the reminder consumer and the
/// inbound API server
#[derive(Debug, Clone)]
pub struct NotificationService {
    bot: Bot,
}

impl NotificationService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Send a plain text message to a user
    pub async fn send_text(&self, telegram_id: i64, text: &str) -> Result<Message> {
        debug!(telegram_id = telegram_id, "Sending text message");

        self.bot
            .send_message(ChatId(telegram_id), text)
            .await
            .map_err(|e| {
                error!(telegram_id = telegram_id, error = %e, "Failed to send text message");
                QuizPalError::Telegram(e)
            })
    }

    /// Send a sticker to a user by file ID
    pub async fn send_sticker(&self, telegram_id: i64, sticker_id: &str) -> Result<Message> {
        debug!(telegram_id = telegram_id, "Sending sticker");

        self.bot
            .send_sticker(
                ChatId(telegram_id),
                InputFile::file_id(sticker_id.to_string()),
            )
            .await
            .map_err(|e| {
                error!(telegram_id = telegram_id, error = %e, "Failed to send sticker");
                QuizPalError::Telegram(e)
            })
    }

    /// Send a venue (map pin) for a place, falling back to a plain address
    /// line when the place has no coordinates
    pub async fn send_venue(&self, telegram_id: i64, place: &Place) -> Result<Message> {
        match (place.latitude, place.longitude) {
            (Some(lat), Some(lon)) => self
                .bot
                .send_venue(ChatId(telegram_id), lat, lon, &place.name, &place.address)
                .await
                .map_err(QuizPalError::Telegram),
            _ => {
                let text = format!("{}\n{}", place.name, place.address);
                self.send_text(telegram_id, &text).await
            }
        }
    }
}
