//! Game browsing callback handlers
//!
//! Games list, game card, players list, venue, ICS file and photo album.

use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile};
use teloxide::Bot;
use tracing::debug;

use crate::i18n::{I18n, TranslationParams};
use crate::models::{CallbackCommand, Degree, Game, Place};
use crate::utils::errors::Result;
use crate::utils::helpers::format_game_date;
use super::{build_keyboard, CallbackContext};

/// Games per page in the list keyboard
pub const PAGE_SIZE: u32 = 5;

/// Send the paginated upcoming-games list
pub async fn handle_games_list(ctx: &CallbackContext, page: u32) -> Result<()> {
    let games_page = ctx.facades.games.list_upcoming(page, PAGE_SIZE).await?;

    if games_page.games.is_empty() && page == 0 {
        ctx.bot
            .send_message(ctx.chat_id, ctx.t("games.list.empty"))
            .await?;
        return Ok(());
    }

    let mut rows = Vec::new();
    for game in &games_page.games {
        let league = ctx.facades.leagues.get(game.league_id).await?;
        let label = format!(
            "{} {} — {}",
            league.short_name.as_deref().unwrap_or(&league.name),
            game.number,
            format_game_date(game.date)
        );
        rows.push(vec![(label, CallbackCommand::GameCard { game_id: game.id })]);
    }

    let mut nav = Vec::new();
    if page > 0 {
        nav.push((
            ctx.t("games.list.prev"),
            CallbackCommand::GamesList { page: page - 1 },
        ));
    }
    if (page + 1) * PAGE_SIZE < games_page.total {
        nav.push((
            ctx.t("games.list.next"),
            CallbackCommand::GamesList { page: page + 1 },
        ));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }

    let keyboard = build_keyboard(&ctx.store, rows).await?;
    ctx.bot
        .send_message(ctx.chat_id, ctx.t("games.list.title"))
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Send one game's card with its action keyboard
pub async fn handle_game_card(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    let game = ctx.facades.games.get(game_id).await?;
    let text = game_card_text(ctx, &game).await?;

    let mut rows = Vec::new();

    if game.has_passed() {
        rows.push(vec![
            (ctx.t("buttons.game.result"), CallbackCommand::GameResult { game_id }),
            (ctx.t("buttons.game.photos"), CallbackCommand::GamePhotos { game_id, index: 0 }),
        ]);
        rows.push(vec![(
            ctx.t("buttons.game.lottery"),
            CallbackCommand::Lottery { game_id },
        )]);
    } else {
        if game.registered {
            rows.push(vec![(
                ctx.t("buttons.game.unregister_team"),
                CallbackCommand::UnregisterGame { game_id },
            )]);
            rows.push(vec![
                (
                    ctx.t("buttons.game.signup"),
                    CallbackCommand::RegisterPlayer { game_id, degree: Degree::Likely },
                ),
                (
                    ctx.t("buttons.game.signup_unlikely"),
                    CallbackCommand::RegisterPlayer { game_id, degree: Degree::Unlikely },
                ),
            ]);
            rows.push(vec![(
                ctx.t("buttons.game.rollback"),
                CallbackCommand::UnregisterPlayer { game_id },
            )]);
        } else {
            rows.push(vec![(
                ctx.t("buttons.game.register_team"),
                CallbackCommand::RegisterGame { game_id },
            )]);
        }
        rows.push(vec![
            (ctx.t("buttons.game.players"), CallbackCommand::PlayersList { game_id }),
            (ctx.t("buttons.game.venue"), CallbackCommand::Venue { place_id: game.place_id }),
        ]);
        rows.push(vec![
            (ctx.t("buttons.game.ics"), CallbackCommand::GetIcsFile { game_id }),
            (ctx.t("buttons.game.math_problem"), CallbackCommand::MathProblem { game_id }),
        ]);
    }

    rows.push(vec![(
        ctx.t("buttons.navigation.back"),
        CallbackCommand::GamesList { page: 0 },
    )]);

    let keyboard = build_keyboard(&ctx.store, rows).await?;
    ctx.bot
        .send_message(ctx.chat_id, text)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Assemble the game card text shown above the action keyboard
pub async fn game_card_text(ctx: &CallbackContext, game: &Game) -> Result<String> {
    let league = ctx.facades.leagues.get(game.league_id).await?;
    let place = ctx.facades.places.get(game.place_id).await?;

    let mut lines = vec![ctx.tp(
        "games.card.title",
        &[("league", league.name.clone()), ("number", game.number.clone())],
    )];

    if let Some(name) = &game.name {
        lines.push(name.clone());
    }

    lines.push(ctx.tp("games.card.date", &[("date", format_game_date(game.date))]));
    lines.push(ctx.tp(
        "games.card.place",
        &[("name", place.name.clone()), ("address", place.address.clone())],
    ));
    lines.push(ctx.tp("games.card.price", &[("price", game.price.to_string())]));

    if game.has_passed() {
        lines.push(ctx.t("games.card.passed"));
    } else if game.registered {
        lines.push(ctx.t("games.card.registered"));
        if let Some(free) = game.free_slots {
            lines.push(ctx.tp("games.card.free_slots", &[("count", free.to_string())]));
        }
    } else {
        lines.push(ctx.t("games.card.not_registered"));
    }

    Ok(lines.join("\n"))
}

/// Send the registered-players list for a game
pub async fn handle_players_list(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    let game = ctx.facades.games.get(game_id).await?;
    let players = ctx.facades.game_players.list(game_id).await?;

    if players.is_empty() {
        ctx.bot
            .send_message(ctx.chat_id, ctx.t("players.empty"))
            .await?;
        return Ok(());
    }

    let league = ctx.facades.leagues.get(game.league_id).await?;
    let mut lines = vec![ctx.tp(
        "players.title",
        &[("league", league.name), ("number", game.number)],
    )];
    for (i, player) in players.iter().enumerate() {
        lines.push(format!(
            "{}. {}{}",
            i + 1,
            player.display_name(),
            player.degree.marker()
        ));
    }

    ctx.bot.send_message(ctx.chat_id, lines.join("\n")).await?;
    Ok(())
}

/// Send the place card plus a venue (map pin) message
pub async fn handle_venue(ctx: &CallbackContext, place_id: i64) -> Result<()> {
    let place = ctx.facades.places.get(place_id).await?;
    send_place_card(&ctx.bot, ctx.chat_id, &ctx.i18n, ctx.lang(), &place).await
}

/// Send the place card text, followed by a map pin when the place has
/// coordinates
pub async fn send_place_card(
    bot: &Bot,
    chat_id: ChatId,
    i18n: &I18n,
    lang: &str,
    place: &Place,
) -> Result<()> {
    let mut params = TranslationParams::new();
    params.insert("name".to_string(), place.name.clone());
    params.insert("address".to_string(), place.address.clone());
    bot.send_message(chat_id, i18n.t("venue.card", lang, Some(&params)))
        .await?;

    if let (Some(lat), Some(lon)) = (place.latitude, place.longitude) {
        bot.send_venue(chat_id, lat, lon, &place.name, &place.address)
            .await?;
    } else {
        debug!(place_id = place.id, "Place has no coordinates, card sent without a pin");
    }

    Ok(())
}

/// Send the calendar file link for a game
pub async fn handle_get_ics_file(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    let ics = ctx.facades.ics_files.get_by_game(game_id).await?;

    ctx.bot
        .send_message(
            ctx.chat_id,
            ctx.tp("ics.message", &[("name", ics.name), ("url", ics.url)]),
        )
        .await?;

    Ok(())
}

/// Send one photo of a game's album with prev/next navigation
pub async fn handle_game_photos(ctx: &CallbackContext, game_id: i64, index: u32) -> Result<()> {
    let urls = ctx.facades.photos.list_by_game(game_id).await?;
    let total = urls.len() as u32;
    let index = index.min(total - 1);
    let url = reqwest::Url::parse(&urls[index as usize])?;

    let mut nav = Vec::new();
    if total > 1 {
        let prev = if index == 0 { total - 1 } else { index - 1 };
        let next = if index + 1 == total { 0 } else { index + 1 };
        nav.push((
            ctx.t("photos.prev"),
            CallbackCommand::GamePhotos { game_id, index: prev },
        ));
        nav.push((
            ctx.t("photos.next"),
            CallbackCommand::GamePhotos { game_id, index: next },
        ));
    }

    let caption = ctx.tp(
        "photos.caption",
        &[("current", (index + 1).to_string()), ("total", total.to_string())],
    );

    let mut request = ctx
        .bot
        .send_photo(ctx.chat_id, InputFile::url(url))
        .caption(caption);
    if !nav.is_empty() {
        let keyboard = build_keyboard(&ctx.store, vec![nav]).await?;
        request = request.reply_markup(keyboard);
    }
    request.await?;

    Ok(())
}
