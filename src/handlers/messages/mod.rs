//! Plain text message handlers
//!
//! Consumes a parked pending input from the settings flow; any other text
//! gets the localized fallback reply.

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, info};

use crate::facades::FacadeFactory;
use crate::i18n::I18n;
use crate::models::UpdateUserRequest;
use crate::state::{PendingInput, StateStorage};
use crate::storage::RequestStore;
use crate::utils::errors::Result;
use crate::utils::helpers::{is_valid_email, is_valid_phone};
use super::callbacks::CallbackContext;
use super::commands::message_context;

/// Handle plain text messages
pub async fn handle_text_message(
    bot: Bot,
    msg: Message,
    facades: FacadeFactory,
    store: RequestStore,
    state: StateStorage,
    i18n: I18n,
) -> Result<()> {
    let Some(text) = msg.text().map(|t| t.trim().to_string()) else {
        return Ok(());
    };

    let Some(ctx) = message_context(bot, &msg, facades, store, state, i18n).await? else {
        return Ok(());
    };

    match ctx.state.get_pending(ctx.user.telegram_id).await? {
        Some(pending) => {
            let result = consume_pending(&ctx, pending, &text).await;
            if let Err(e) = result {
                super::send_error_reply(&ctx.bot, ctx.chat_id, &ctx.i18n, ctx.lang(), &e).await?;
            }
        }
        None => {
            debug!(telegram_id = ctx.user.telegram_id, "Text message outside any flow");
            ctx.bot
                .send_message(ctx.chat_id, ctx.t("messages.fallback"))
                .await?;
        }
    }

    Ok(())
}

/// Validate the typed value, apply the profile update and clear the parked
/// input. Invalid input keeps the input parked so the user can retry.
async fn consume_pending(ctx: &CallbackContext, pending: PendingInput, text: &str) -> Result<()> {
    let mut update = UpdateUserRequest::default();

    match pending {
        PendingInput::Email => {
            if !is_valid_email(text) {
                ctx.bot
                    .send_message(ctx.chat_id, ctx.t("settings.invalid_email"))
                    .await?;
                return Ok(());
            }
            update.email = Some(text.to_string());
        }
        PendingInput::Phone => {
            if !is_valid_phone(text) {
                ctx.bot
                    .send_message(ctx.chat_id, ctx.t("settings.invalid_phone"))
                    .await?;
                return Ok(());
            }
            update.phone = Some(text.to_string());
        }
        PendingInput::Name => {
            if text.is_empty() {
                ctx.bot
                    .send_message(ctx.chat_id, ctx.t("settings.invalid_name"))
                    .await?;
                return Ok(());
            }
            let mut parts = text.splitn(2, char::is_whitespace);
            update.first_name = parts.next().map(|s| s.to_string());
            update.last_name = parts.next().map(|s| s.trim().to_string());
        }
    }

    ctx.facades.users.update(ctx.user.id, update).await?;
    ctx.state.clear_pending(ctx.user.telegram_id).await?;

    info!(telegram_id = ctx.user.telegram_id, pending = ?pending, "Profile field updated");

    ctx.bot
        .send_message(ctx.chat_id, ctx.t("settings.updated"))
        .await?;

    Ok(())
}
