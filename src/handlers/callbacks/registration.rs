//! Registration callback handlers
//!
//! Team registration and player signup, plus their rollbacks. Each arm is a
//! short sequence of backend calls followed by a refreshed game card.

use teloxide::prelude::*;

use crate::models::Degree;
use crate::utils::errors::Result;
use crate::utils::logging::log_user_action;
use super::{games, CallbackContext};

/// Register the club team for a game
pub async fn handle_register_game(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    ctx.facades.games.register(game_id).await?;
    log_user_action(ctx.user.telegram_id, "register_game", None);

    let game = ctx.facades.games.get(game_id).await?;
    let league = ctx.facades.leagues.get(game.league_id).await?;
    ctx.bot
        .send_message(
            ctx.chat_id,
            ctx.tp(
                "registration.game_registered",
                &[("league", league.name), ("number", game.number.clone())],
            ),
        )
        .await?;

    // Refresh the card so the buttons match the new registration state
    games::handle_game_card(ctx, game_id).await
}

/// Roll back the club team registration
pub async fn handle_unregister_game(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    ctx.facades.games.unregister(game_id).await?;
    log_user_action(ctx.user.telegram_id, "unregister_game", None);

    ctx.bot
        .send_message(ctx.chat_id, ctx.t("registration.game_unregistered"))
        .await?;

    games::handle_game_card(ctx, game_id).await
}

/// Sign the pressing user up as a player
pub async fn handle_register_player(
    ctx: &CallbackContext,
    game_id: i64,
    degree: Degree,
) -> Result<()> {
    ctx.facades
        .game_players
        .register(game_id, ctx.user.id, degree)
        .await?;
    log_user_action(ctx.user.telegram_id, "register_player", None);

    let key = match degree {
        Degree::Likely => "registration.player_registered",
        Degree::Unlikely => "registration.player_registered_unlikely",
    };
    ctx.bot.send_message(ctx.chat_id, ctx.t(key)).await?;

    Ok(())
}

/// Roll back the pressing user's signup
pub async fn handle_unregister_player(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    ctx.facades
        .game_players
        .unregister(game_id, ctx.user.id)
        .await?;
    log_user_action(ctx.user.telegram_id, "unregister_player", None);

    ctx.bot
        .send_message(ctx.chat_id, ctx.t("registration.player_unregistered"))
        .await?;

    Ok(())
}
