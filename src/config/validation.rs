//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{QuizPalError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_backend_config(&settings.backend)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_api_config(&settings.api)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(QuizPalError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate registration gateway configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(QuizPalError::Config(
            "Backend base URL is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(QuizPalError::Config(
            "Backend timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(QuizPalError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(QuizPalError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(QuizPalError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(QuizPalError::Config(
            "Redis URL is required".to_string()
        ));
    }

    if config.reminder_queue.is_empty() {
        return Err(QuizPalError::Config(
            "Reminder queue name is required".to_string()
        ));
    }

    Ok(())
}

/// Validate inbound API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.bind_address.parse::<std::net::SocketAddr>().is_err() {
        return Err(QuizPalError::Config(
            format!("Invalid API bind address: {}", config.bind_address)
        ));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_language.is_empty() {
        return Err(QuizPalError::Config(
            "Default language is required".to_string()
        ));
    }

    if config.supported_languages.is_empty() {
        return Err(QuizPalError::Config(
            "At least one supported language is required".to_string()
        ));
    }

    if !config.supported_languages.contains(&config.default_language) {
        return Err(QuizPalError::Config(
            "Default language must be in supported languages list".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(QuizPalError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(QuizPalError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
