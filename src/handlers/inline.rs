//! Inline query handler
//!
//! Lets users share upcoming games into any chat via @bot mentions. Results
//! are plain text articles; action buttons only live in the private chat.

use std::collections::HashMap;
use teloxide::{
    Bot,
    types::{
        InlineQuery, InlineQueryResult, InlineQueryResultArticle, InputMessageContent,
        InputMessageContentText,
    },
    prelude::*,
};
use tracing::debug;

use crate::facades::FacadeFactory;
use crate::i18n::I18n;
use crate::middleware::{ensure_user, GateOutcome};
use crate::utils::errors::Result;
use crate::utils::helpers::format_game_date;

/// How many articles one inline answer carries
const INLINE_RESULT_LIMIT: u32 = 10;

/// Handle an inline query: search upcoming games by league or place name
pub async fn handle_inline_query(
    bot: Bot,
    query: InlineQuery,
    facades: FacadeFactory,
    i18n: I18n,
) -> Result<()> {
    let text = query.query.trim();

    debug!(user_id = query.from.id.0, query = %text, "Processing inline query");

    // Same gate as every other update path; a banned user gets an empty
    // answer instead of a searchable game list.
    let user = match ensure_user(&facades.users, &query.from).await? {
        GateOutcome::Allowed(user) => user,
        GateOutcome::Banned => {
            bot.answer_inline_query(query.id, Vec::<InlineQueryResult>::new())
                .cache_time(0)
                .is_personal(true)
                .await?;
            return Ok(());
        }
    };
    let lang = &user.language_code;

    let games = if text.is_empty() {
        facades
            .games
            .list_upcoming(0, INLINE_RESULT_LIMIT)
            .await?
            .games
    } else {
        facades.games.search(text, INLINE_RESULT_LIMIT).await?
    };

    let mut results = Vec::with_capacity(games.len());
    for game in games {
        let league = facades.leagues.get(game.league_id).await?;
        let place = facades.places.get(game.place_id).await?;

        let mut params = HashMap::new();
        params.insert("league".to_string(), league.name.clone());
        params.insert("number".to_string(), game.number.clone());
        params.insert("date".to_string(), format_game_date(game.date));
        params.insert("place".to_string(), place.name.clone());
        params.insert("address".to_string(), place.address.clone());

        let title = format!("{} {}", league.name, game.number);
        let content = i18n.t("inline.game_message", lang, Some(&params));
        let description = format!("{} | {}", format_game_date(game.date), place.name);

        results.push(InlineQueryResult::Article(
            InlineQueryResultArticle::new(
                format!("game:{}", game.id),
                title,
                InputMessageContent::Text(InputMessageContentText::new(content)),
            )
            .description(description),
        ));
    }

    // Registration state is per-user, answers must not be shared
    bot.answer_inline_query(query.id, results)
        .cache_time(0)
        .is_personal(true)
        .await?;

    Ok(())
}
