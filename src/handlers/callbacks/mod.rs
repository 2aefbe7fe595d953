//! Callback query handlers module
//!
//! Inline buttons carry only a request-store UUID; the stored payload is
//! looked up and dispatched through the command table here.

pub mod games;
pub mod registration;
pub mod extras;
pub mod profile;

use std::collections::HashMap;
use teloxide::{Bot, types::{CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup}, prelude::*};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::facades::FacadeFactory;
use crate::i18n::I18n;
use crate::middleware::{ensure_user, GateOutcome};
use crate::models::{CallbackCommand, User};
use crate::state::StateStorage;
use crate::storage::RequestStore;
use crate::utils::errors::Result;
use crate::utils::logging::log_callback_dispatch;

/// Everything a callback arm needs, bundled to keep signatures flat
#[derive(Clone)]
pub struct CallbackContext {
    pub bot: Bot,
    pub chat_id: ChatId,
    pub user: User,
    pub facades: FacadeFactory,
    pub store: RequestStore,
    pub state: StateStorage,
    pub i18n: I18n,
}

impl CallbackContext {
    pub fn lang(&self) -> &str {
        &self.user.language_code
    }

    /// Translate with no parameters
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, self.lang(), None)
    }

    /// Translate with parameters
    pub fn tp(&self, key: &str, params: &[(&str, String)]) -> String {
        let params: HashMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.i18n.t(key, self.lang(), Some(&params))
    }
}

/// Build an inline keyboard whose buttons reference freshly stored
/// callback requests, all sharing one group UUID
pub async fn build_keyboard(
    store: &RequestStore,
    rows: Vec<Vec<(String, CallbackCommand)>>,
) -> Result<InlineKeyboardMarkup> {
    let group_uuid = Uuid::new_v4();
    let mut keyboard_rows = Vec::with_capacity(rows.len());

    for row in rows {
        let mut buttons = Vec::with_capacity(row.len());
        for (label, command) in row {
            let uuid = store.register(group_uuid, &command).await?;
            buttons.push(InlineKeyboardButton::callback(label, uuid.to_string()));
        }
        keyboard_rows.push(buttons);
    }

    Ok(InlineKeyboardMarkup::new(keyboard_rows))
}

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    facades: FacadeFactory,
    store: RequestStore,
    state: StateStorage,
    i18n: I18n,
) -> Result<()> {
    let tg_user = query.from.clone();
    let user_id = tg_user.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        // Callbacks from inline-mode messages carry no chat; reply in the
        // presser's private chat.
        .unwrap_or(ChatId(user_id));

    debug!(user_id = user_id, callback_data = ?query.data, "Processing callback query");

    let Some(data) = query.data.clone() else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    // Resolve the stored payload before answering so an expired button can
    // be acknowledged with an alert.
    let command = match RequestStore::parse_callback_data(&data) {
        Ok(uuid) => store.find(uuid).await?,
        Err(_) => {
            warn!(user_id = user_id, data = %data, "Malformed callback data");
            None
        }
    };

    let Some((group_uuid, command)) = command else {
        let text = i18n.t(
            "messages.errors.button_expired",
            tg_user.language_code.as_deref().unwrap_or("en"),
            None,
        );
        bot.answer_callback_query(query.id.clone())
            .text(text)
            .show_alert(true)
            .await?;
        return Ok(());
    };

    // Answer early to remove the loading spinner
    bot.answer_callback_query(query.id.clone()).await?;

    // User-lookup / auto-registration step and banned-user gate
    let user = match ensure_user(&facades.users, &tg_user).await? {
        GateOutcome::Allowed(user) => user,
        GateOutcome::Banned => return Ok(()),
    };

    log_callback_dispatch(user_id, command.name(), &data);

    let ctx = CallbackContext {
        bot,
        chat_id,
        user,
        facades,
        store: store.clone(),
        state,
        i18n,
    };

    let result = dispatch(&ctx, &command).await;

    if result.is_ok() && command.is_destructive() {
        // A registration state change invalidates sibling buttons on the
        // same message.
        store.delete_group(group_uuid).await?;
    }

    if let Err(e) = result {
        info!(user_id = user_id, command = command.name(), error = %e, "Callback command failed");
        super::send_error_reply(&ctx.bot, ctx.chat_id, &ctx.i18n, ctx.lang(), &e).await?;
    }

    Ok(())
}

/// The flat command dispatch table
async fn dispatch(ctx: &CallbackContext, command: &CallbackCommand) -> Result<()> {
    match command {
        CallbackCommand::GamesList { page } => games::handle_games_list(ctx, *page).await,
        CallbackCommand::GameCard { game_id } => games::handle_game_card(ctx, *game_id).await,
        CallbackCommand::PlayersList { game_id } => games::handle_players_list(ctx, *game_id).await,
        CallbackCommand::Venue { place_id } => games::handle_venue(ctx, *place_id).await,
        CallbackCommand::GetIcsFile { game_id } => games::handle_get_ics_file(ctx, *game_id).await,
        CallbackCommand::GamePhotos { game_id, index } => {
            games::handle_game_photos(ctx, *game_id, *index).await
        }
        CallbackCommand::RegisterGame { game_id } => {
            registration::handle_register_game(ctx, *game_id).await
        }
        CallbackCommand::UnregisterGame { game_id } => {
            registration::handle_unregister_game(ctx, *game_id).await
        }
        CallbackCommand::RegisterPlayer { game_id, degree } => {
            registration::handle_register_player(ctx, *game_id, *degree).await
        }
        CallbackCommand::UnregisterPlayer { game_id } => {
            registration::handle_unregister_player(ctx, *game_id).await
        }
        CallbackCommand::GameResult { game_id } => extras::handle_game_result(ctx, *game_id).await,
        CallbackCommand::Lottery { game_id } => extras::handle_lottery(ctx, *game_id).await,
        CallbackCommand::MathProblem { game_id } => {
            extras::handle_math_problem(ctx, *game_id).await
        }
        CallbackCommand::CertificatesList => extras::handle_certificates_list(ctx).await,
        CallbackCommand::CertificateCard { certificate_id } => {
            extras::handle_certificate_card(ctx, *certificate_id).await
        }
        CallbackCommand::Settings => profile::handle_settings(ctx).await,
        CallbackCommand::ChangeEmail => {
            profile::handle_change_request(ctx, crate::state::PendingInput::Email).await
        }
        CallbackCommand::ChangeName => {
            profile::handle_change_request(ctx, crate::state::PendingInput::Name).await
        }
        CallbackCommand::ChangePhone => {
            profile::handle_change_request(ctx, crate::state::PendingInput::Phone).await
        }
        CallbackCommand::Cancel => profile::handle_cancel(ctx).await,
    }
}
