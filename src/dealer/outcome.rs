//! How a game ended.

use serde::{Deserialize, Serialize};

use crate::player::{format_rankings, PlayerScore};

/// Final result of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every player was removed before the game could end normally.
    NoPlayers,
    /// Scores, highest first. Ties keep table order.
    Ranked(Vec<PlayerScore>),
}

impl GameOutcome {
    /// The top-ranked player, if anyone is left.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerScore> {
        match self {
            GameOutcome::NoPlayers => None,
            GameOutcome::Ranked(scores) => scores.first(),
        }
    }

    #[must_use]
    pub fn rankings(&self) -> &[PlayerScore] {
        match self {
            GameOutcome::NoPlayers => &[],
            GameOutcome::Ranked(scores) => scores,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::NoPlayers => f.write_str("All players kicked from game"),
            GameOutcome::Ranked(scores) => f.write_str(&format_rankings(scores)),
        }
    }
}
