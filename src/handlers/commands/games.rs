//! Games command handler

use crate::utils::errors::Result;
use super::super::callbacks::{games, CallbackContext};

/// Handle /games command - same rendering as the games-list button
pub async fn handle_games(ctx: &CallbackContext) -> Result<()> {
    games::handle_games_list(ctx, 0).await
}
