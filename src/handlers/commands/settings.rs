//! Settings command handler

use crate::utils::errors::Result;
use super::super::callbacks::{profile, CallbackContext};

/// Handle /settings command - same rendering as the settings button
pub async fn handle_settings(ctx: &CallbackContext) -> Result<()> {
    profile::handle_settings(ctx).await
}
