//! User gate middleware
//!
//! Every update passes through a user-lookup / auto-registration step before
//! any handler runs; banned users are dropped silently.

use teloxide::types::User as TgUser;
use tracing::{debug, info};

use crate::facades::UsersFacade;
use crate::models::{CreateUserRequest, User};
use crate::utils::errors::Result;

/// Outcome of the pre-handler user gate
#[derive(Debug, Clone)]
pub enum GateOutcome {
    /// Proceed with this user's profile
    Allowed(User),
    /// User is banned upstream; drop the update without a reply
    Banned,
}

/// Look up the sender in the user-manager, auto-registering on first
/// contact, and apply the banned-user gate
pub async fn ensure_user(users: &UsersFacade, tg_user: &TgUser) -> Result<GateOutcome> {
    let telegram_id = tg_user.id.0 as i64;

    let user = match users.get_by_telegram_id(telegram_id).await? {
        Some(user) => user,
        None => {
            info!(telegram_id = telegram_id, "First contact, auto-registering user");
            users
                .create(CreateUserRequest {
                    telegram_id,
                    first_name: tg_user.first_name.clone(),
                    last_name: tg_user.last_name.clone(),
                    username: tg_user.username.clone(),
                    language_code: tg_user.language_code.clone(),
                })
                .await?
        }
    };

    if user.is_banned {
        debug!(telegram_id = telegram_id, "Dropping update from banned user");
        return Ok(GateOutcome::Banned);
    }

    Ok(GateOutcome::Allowed(user))
}
