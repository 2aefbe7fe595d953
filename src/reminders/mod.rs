//! Reminder delivery module
//!
//! A single serial consumer draining the Redis reminder queue and fanning
//! messages out to the players of a game.

pub mod consumer;

pub use consumer::{ReminderConsumer, ReminderPayload};
