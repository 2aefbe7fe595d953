//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};

/// Format a game date for display
pub fn format_game_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%d.%m.%Y %H:%M").to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Check whether a string looks like a valid e-mail address
pub fn is_valid_email(text: &str) -> bool {
    // Deliberately loose, the backend re-validates
    let re = regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok();
    re.map(|re| re.is_match(text)).unwrap_or(false)
}

/// Check whether a string looks like a phone number
pub fn is_valid_phone(text: &str) -> bool {
    let re = regex::Regex::new(r"^\+?\d{7,15}$").ok();
    re.map(|re| re.is_match(text)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_game_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 8, 19, 30, 0).unwrap();
        assert_eq!(format_game_date(ts), "08.03.2024 19:30");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a very long text", 10), "a very ...");
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("team@example.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+79161234567"));
        assert!(is_valid_phone("89161234567"));
        assert!(!is_valid_phone("call me"));
    }
}
