//! Start command handler
//!
//! The user gate has already run by the time we get here, so /start only
//! greets the user and opens the games list.

use teloxide::prelude::*;
use tracing::info;

use crate::models::CallbackCommand;
use crate::utils::errors::Result;
use super::super::callbacks::{build_keyboard, CallbackContext};

/// Handle /start command
pub async fn handle_start(ctx: &CallbackContext) -> Result<()> {
    info!(telegram_id = ctx.user.telegram_id, "User started the bot");

    let text = format!(
        "{}\n\n{}",
        ctx.tp("commands.start.greeting", &[("name", ctx.user.first_name.clone())]),
        ctx.t("commands.start.intro"),
    );

    let keyboard = build_keyboard(
        &ctx.store,
        vec![
            vec![(ctx.t("buttons.menu.games"), CallbackCommand::GamesList { page: 0 })],
            vec![
                (ctx.t("buttons.menu.certificates"), CallbackCommand::CertificatesList),
                (ctx.t("buttons.menu.settings"), CallbackCommand::Settings),
            ],
        ],
    )
    .await?;

    ctx.bot
        .send_message(ctx.chat_id, text)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}
