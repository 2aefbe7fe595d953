//! Help command handler

use teloxide::prelude::*;

use crate::utils::errors::Result;
use super::super::callbacks::CallbackContext;

/// Handle /help command
pub async fn handle_help(ctx: &CallbackContext) -> Result<()> {
    ctx.bot
        .send_message(ctx.chat_id, ctx.t("commands.help.text"))
        .await?;
    Ok(())
}
