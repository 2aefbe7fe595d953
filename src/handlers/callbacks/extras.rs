//! Post-game and certificate callback handlers
//!
//! Game results, the winner lottery, warm-up math problems and the
//! certificate wallet.

use rand::seq::SliceRandom;
use teloxide::prelude::*;
use tracing::info;

use crate::models::CallbackCommand;
use crate::utils::errors::{QuizPalError, Result};
use crate::utils::helpers::truncate_text;
use super::{build_keyboard, CallbackContext};

/// Send the team's result for a passed game
pub async fn handle_game_result(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    let result = ctx.facades.game_results.get_by_game(game_id).await?;

    let mut lines = vec![ctx.tp(
        "result.text",
        &[
            ("place", result.place.to_string()),
            ("points", result.points.to_string()),
        ],
    )];
    if let Some(rounds) = result.round_points {
        lines.push(ctx.tp("result.rounds", &[("rounds", rounds)]));
    }

    ctx.bot.send_message(ctx.chat_id, lines.join("\n")).await?;
    Ok(())
}

/// Draw a random registered player of a passed game and issue them a
/// certificate
pub async fn handle_lottery(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    let players = ctx.facades.game_players.list(game_id).await?;

    let winner = players
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(QuizPalError::LotteryNotAvailable { game_id })?;

    let certificate = ctx
        .facades
        .certificates
        .issue(game_id, winner.user_id)
        .await?;

    info!(
        game_id = game_id,
        winner_user_id = winner.user_id,
        certificate_id = certificate.id,
        "Lottery winner drawn"
    );

    ctx.bot
        .send_message(
            ctx.chat_id,
            ctx.tp(
                "lottery.winner",
                &[
                    ("name", winner.display_name()),
                    ("info", certificate.info),
                ],
            ),
        )
        .await?;

    Ok(())
}

/// Send the warm-up math problem attached to a game
pub async fn handle_math_problem(ctx: &CallbackContext, game_id: i64) -> Result<()> {
    let problem = ctx.facades.math_problems.get_by_game(game_id).await?;

    ctx.bot
        .send_message(
            ctx.chat_id,
            format!("{}\n\n{}", ctx.t("math_problem.title"), problem.text),
        )
        .await?;

    Ok(())
}

/// Send the user's certificate wallet as a keyboard
pub async fn handle_certificates_list(ctx: &CallbackContext) -> Result<()> {
    let certificates = ctx.facades.certificates.list_by_user(ctx.user.id).await?;

    if certificates.is_empty() {
        ctx.bot
            .send_message(ctx.chat_id, ctx.t("certificates.empty"))
            .await?;
        return Ok(());
    }

    let rows = certificates
        .iter()
        .map(|cert| {
            let marker = if cert.is_spent() {
                ctx.t("certificates.spent_marker")
            } else {
                String::new()
            };
            vec![(
                format!("{}{}", truncate_text(&cert.info, 40), marker),
                CallbackCommand::CertificateCard { certificate_id: cert.id },
            )]
        })
        .collect();

    let keyboard = build_keyboard(&ctx.store, rows).await?;
    ctx.bot
        .send_message(ctx.chat_id, ctx.t("certificates.title"))
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Send one certificate's details
pub async fn handle_certificate_card(ctx: &CallbackContext, certificate_id: i64) -> Result<()> {
    let certificate = ctx.facades.certificates.get(certificate_id).await?;
    let won_on = ctx.facades.games.get(certificate.won_on_game_id).await?;
    let league = ctx.facades.leagues.get(won_on.league_id).await?;

    let mut lines = vec![
        certificate.info.clone(),
        ctx.tp(
            "certificates.won_on",
            &[("league", league.name), ("number", won_on.number)],
        ),
    ];
    if certificate.is_spent() {
        lines.push(ctx.t("certificates.spent"));
    } else {
        lines.push(ctx.t("certificates.available"));
    }

    ctx.bot.send_message(ctx.chat_id, lines.join("\n")).await?;
    Ok(())
}
