//! Profile settings callback handlers
//!
//! The settings menu and the pending-input flow for changing e-mail, name
//! and phone. The actual value arrives as a plain text message and is
//! consumed in the messages handler.

use teloxide::prelude::*;

use crate::models::CallbackCommand;
use crate::state::PendingInput;
use crate::utils::errors::Result;
use super::{build_keyboard, CallbackContext};

/// Send the settings menu with the current profile values
pub async fn handle_settings(ctx: &CallbackContext) -> Result<()> {
    let dash = ctx.t("settings.not_set");
    let name = match &ctx.user.last_name {
        Some(last) => format!("{} {}", ctx.user.first_name, last),
        None => ctx.user.first_name.clone(),
    };

    let text = [
        ctx.t("settings.title"),
        ctx.tp("settings.name", &[("value", name)]),
        ctx.tp(
            "settings.email",
            &[("value", ctx.user.email.clone().unwrap_or_else(|| dash.clone()))],
        ),
        ctx.tp(
            "settings.phone",
            &[("value", ctx.user.phone.clone().unwrap_or(dash))],
        ),
    ]
    .join("\n");

    let keyboard = build_keyboard(
        &ctx.store,
        vec![
            vec![(ctx.t("buttons.settings.change_name"), CallbackCommand::ChangeName)],
            vec![(ctx.t("buttons.settings.change_email"), CallbackCommand::ChangeEmail)],
            vec![(ctx.t("buttons.settings.change_phone"), CallbackCommand::ChangePhone)],
            vec![(ctx.t("buttons.settings.certificates"), CallbackCommand::CertificatesList)],
        ],
    )
    .await?;

    ctx.bot
        .send_message(ctx.chat_id, text)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Park a pending input and prompt the user for the new value
pub async fn handle_change_request(ctx: &CallbackContext, pending: PendingInput) -> Result<()> {
    ctx.state.set_pending(ctx.user.telegram_id, pending).await?;

    let keyboard = build_keyboard(
        &ctx.store,
        vec![vec![(ctx.t("buttons.settings.cancel"), CallbackCommand::Cancel)]],
    )
    .await?;

    ctx.bot
        .send_message(ctx.chat_id, ctx.t(pending.prompt_key()))
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Drop any parked pending input
pub async fn handle_cancel(ctx: &CallbackContext) -> Result<()> {
    ctx.state.clear_pending(ctx.user.telegram_id).await?;

    ctx.bot
        .send_message(ctx.chat_id, ctx.t("settings.cancelled"))
        .await?;

    Ok(())
}
