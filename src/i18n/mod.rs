//! Internationalization module
//!
//! Multi-language support for chat replies: translation loading, message
//! formatting and language fallback.

pub mod loader;

pub use loader::{I18n, TranslationParams};
