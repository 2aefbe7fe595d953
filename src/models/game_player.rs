//! Game player model

use serde::{Deserialize, Serialize};

/// A player's likelihood of actually attending the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degree {
    Likely,
    Unlikely,
}

impl Degree {
    /// Marker shown next to the player's name in the players list
    pub fn marker(&self) -> &'static str {
        match self {
            Degree::Likely => "",
            Degree::Unlikely => " (?)",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePlayer {
    pub game_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub degree: Degree,
}

impl GamePlayer {
    /// Display name for the players list
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_serialization() {
        assert_eq!(serde_json::to_string(&Degree::Likely).unwrap(), "\"likely\"");
        assert_eq!(serde_json::to_string(&Degree::Unlikely).unwrap(), "\"unlikely\"");

        let degree: Degree = serde_json::from_str("\"unlikely\"").unwrap();
        assert_eq!(degree, Degree::Unlikely);
    }

    #[test]
    fn test_display_name() {
        let player = GamePlayer {
            game_id: 1,
            user_id: 2,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            degree: Degree::Likely,
        };
        assert_eq!(player.display_name(), "Ada Lovelace");
    }
}
