//! Users facade
//!
//! Wraps the user-manager service: lookup by Telegram ID, first-contact
//! auto-registration, profile updates.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::BackendClient;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::{BackendError, QuizPalError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub telegram_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub language_code: Option<String>,
    pub banned: bool,
}

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    telegram_id: i64,
    first_name: &'a str,
    last_name: Option<&'a str>,
    username: Option<&'a str>,
    language_code: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct UsersFacade {
    client: BackendClient,
}

impl UsersFacade {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Fetch a user by Telegram ID
    pub async fn get_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>> {
        match self
            .client
            .get::<UserDto>(&format!("/v1/users/by-telegram-id/{}", telegram_id))
            .await
        {
            Ok(dto) => Ok(Some(map_user(dto))),
            Err(err) if err.reason() == Some("user_not_found") => Ok(None),
            Err(err) => Err(QuizPalError::Backend(err)),
        }
    }

    /// Register a new user on first contact
    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        info!(telegram_id = request.telegram_id, "Registering new user");

        let body = CreateUserBody {
            telegram_id: request.telegram_id,
            first_name: &request.first_name,
            last_name: request.last_name.as_deref(),
            username: request.username.as_deref(),
            language_code: request.language_code.as_deref(),
        };

        let dto: UserDto = self
            .client
            .post("/v1/users", &body)
            .await
            .map_err(|e| translate(e, request.telegram_id))?;

        Ok(map_user(dto))
    }

    /// Update user profile fields
    pub async fn update(&self, user_id: i64, request: UpdateUserRequest) -> Result<User> {
        debug!(user_id = user_id, "Updating user profile");

        let dto: UserDto = self
            .client
            .patch(&format!("/v1/users/{}", user_id), &request)
            .await
            .map_err(|e| translate(e, user_id))?;

        Ok(map_user(dto))
    }
}

fn map_user(dto: UserDto) -> User {
    User {
        id: dto.id,
        telegram_id: dto.telegram_id,
        first_name: dto.first_name,
        last_name: dto.last_name,
        username: dto.username,
        email: dto.email,
        phone: dto.phone,
        language_code: dto.language_code.unwrap_or_else(|| "en".to_string()),
        is_banned: dto.banned,
    }
}

fn translate(err: BackendError, telegram_id: i64) -> QuizPalError {
    match err.reason() {
        Some("user_not_found") => QuizPalError::UserNotFound { telegram_id },
        _ => QuizPalError::Backend(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_mapping_defaults_language() {
        let json = r#"{
            "id": 1, "telegram_id": 100, "first_name": "Ada",
            "last_name": null, "username": "ada", "email": null,
            "phone": null, "language_code": null, "banned": false
        }"#;
        let dto: UserDto = serde_json::from_str(json).unwrap();
        let user = map_user(dto);
        assert_eq!(user.language_code, "en");
        assert!(!user.is_banned);
    }
}
