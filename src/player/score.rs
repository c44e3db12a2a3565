//! End-of-game scores and rankings.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A player's final tally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerScore {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
}

impl PlayerScore {
    pub fn new(id: PlayerId, name: impl Into<String>, score: u32) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }
}

impl std::fmt::Display for PlayerScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player id: {} player info: {} score: {}", self.id.raw(), self.name, self.score)
    }
}

/// Highest score first. Ties keep table order.
#[must_use]
pub fn rank(mut scores: Vec<PlayerScore>) -> Vec<PlayerScore> {
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

/// Printable results table, one line per rank starting at 1.
#[must_use]
pub fn format_rankings(rankings: &[PlayerScore]) -> String {
    let mut out = String::from("Game Results\n");
    for (i, entry) in rankings.iter().enumerate() {
        out.push_str(&format!("{} {}\n", i + 1, entry));
    }
    out
}
