//! Update handlers module
//!
//! Message commands, callback queries, inline queries and plain messages.

pub mod commands;
pub mod callbacks;
pub mod messages;
pub mod inline;

use teloxide::{Bot, types::ChatId, prelude::*};

use crate::i18n::I18n;
use crate::utils::errors::{QuizPalError, Result};

/// Map a handler error to a localized chat reply.
///
/// Sentinel errors carry their own i18n key; everything else falls back to
/// the generic "something went wrong" message.
pub async fn send_error_reply(
    bot: &Bot,
    chat_id: ChatId,
    i18n: &I18n,
    lang: &str,
    error: &QuizPalError,
) -> Result<()> {
    let key = error.reply_key().unwrap_or("messages.errors.generic");
    bot.send_message(chat_id, i18n.t(key, lang, None)).await?;
    Ok(())
}
