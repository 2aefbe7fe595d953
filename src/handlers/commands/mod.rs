//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;
pub mod games;
pub mod settings;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use tracing::debug;

use crate::facades::FacadeFactory;
use crate::i18n::I18n;
use crate::middleware::{ensure_user, GateOutcome};
use crate::state::StateStorage;
use crate::storage::RequestStore;
use crate::utils::errors::{QuizPalError, Result};
use super::callbacks::CallbackContext;

/// All available bot commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "QuizPal commands:")]
pub enum Command {
    #[command(description = "Start the bot and show welcome message")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "List upcoming games")]
    Games,
    #[command(description = "Show profile settings")]
    Settings,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    facades: FacadeFactory,
    store: RequestStore,
    state: StateStorage,
    i18n: I18n,
) -> Result<()> {
    let Some(ctx) = message_context(bot, &msg, facades, store, state, i18n).await? else {
        return Ok(());
    };

    let result = match cmd {
        Command::Start => start::handle_start(&ctx).await,
        Command::Help => help::handle_help(&ctx).await,
        Command::Games => games::handle_games(&ctx).await,
        Command::Settings => settings::handle_settings(&ctx).await,
    };

    if let Err(e) = result {
        super::send_error_reply(&ctx.bot, ctx.chat_id, &ctx.i18n, ctx.lang(), &e).await?;
    }

    Ok(())
}

/// Run the user gate for a message update and bundle the handler context.
/// Returns None when the sender is banned or the update carries no sender.
pub async fn message_context(
    bot: Bot,
    msg: &Message,
    facades: FacadeFactory,
    store: RequestStore,
    state: StateStorage,
    i18n: I18n,
) -> Result<Option<CallbackContext>> {
    let tg_user = msg
        .from
        .as_ref()
        .ok_or_else(|| QuizPalError::InvalidInput("No user in message".to_string()))?;

    let user = match ensure_user(&facades.users, tg_user).await? {
        GateOutcome::Allowed(user) => user,
        GateOutcome::Banned => {
            debug!(telegram_id = tg_user.id.0, "Banned user ignored");
            return Ok(None);
        }
    };

    Ok(Some(CallbackContext {
        bot,
        chat_id: msg.chat.id,
        user,
        facades,
        store,
        state,
        i18n,
    }))
}
