//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the QuizPal application.

use tracing::{info, warn, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard owns the rolling-file writer thread; hold it for the
/// lifetime of the process or the file layer stops flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "quizpal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: i64, action: &str, details: Option<&str>) {
    info!(
        user_id = user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log callback command dispatch
pub fn log_callback_dispatch(user_id: i64, command: &str, uuid: &str) {
    debug!(
        user_id = user_id,
        command = command,
        uuid = uuid,
        "Callback command dispatched"
    );
}

/// Log reminder delivery results
pub fn log_reminder_delivery(game_id: i64, sent: usize, failed: usize) {
    if failed > 0 {
        warn!(
            game_id = game_id,
            sent = sent,
            failed = failed,
            "Reminder delivery completed with failures"
        );
    } else {
        info!(
            game_id = game_id,
            sent = sent,
            "Reminder delivery completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_writes_through_the_returned_guard() {
        let dir = std::env::temp_dir().join("quizpal-logging-test");
        std::fs::create_dir_all(&dir).unwrap();

        let config = LoggingConfig {
            level: "info".to_string(),
            file_path: dir.to_string_lossy().into_owned(),
        };

        let guard = init_logging(&config).unwrap();
        info!("file sink smoke line");
        // Dropping the guard flushes the worker thread into the log file
        drop(guard);

        assert!(std::fs::read_dir(&dir).unwrap().next().is_some());
    }
}
