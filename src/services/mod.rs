//! Services module
//!
//! Cross-cutting services that are not facades over the gateway.

pub mod notification;

pub use notification::NotificationService;
