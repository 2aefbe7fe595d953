//! Inbound service API module
//!
//! A small HTTP surface other backend services call to push messages to
//! users through the bot.

pub mod server;

pub use server::{router, run_api_server, ApiState};
