//! Middleware module
//!
//! Pre-handler steps applied to every update.

pub mod auth;

pub use auth::{GateOutcome, ensure_user};
