//! Game model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub league_id: i64,
    pub place_id: i64,
    /// Game number within the league season, e.g. "42.1"
    pub number: String,
    pub name: Option<String>,
    pub date: DateTime<Utc>,
    pub price: u32,
    /// Whether the club team is registered for this game
    pub registered: bool,
    /// Free player slots left on the team, if known
    pub free_slots: Option<u32>,
}

impl Game {
    /// Whether the game date is already in the past
    pub fn has_passed(&self) -> bool {
        self.date < Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn game(date: DateTime<Utc>) -> Game {
        Game {
            id: 1,
            league_id: 1,
            place_id: 1,
            number: "42.1".to_string(),
            name: None,
            date,
            price: 400,
            registered: false,
            free_slots: Some(3),
        }
    }

    #[test]
    fn test_has_passed() {
        assert!(game(Utc::now() - Duration::hours(1)).has_passed());
        assert!(!game(Utc::now() + Duration::hours(1)).has_passed());
    }
}
