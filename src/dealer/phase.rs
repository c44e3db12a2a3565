//! Round phases and feeding-step reports.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Where the dealer is within a round.
///
/// `Action -> Feeding -> Cleanup -> Action`, until the termination test in
/// `Action` moves to `GameOver`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Deal cards and collect turn actions.
    Action,
    /// Feed players one step at a time.
    Feeding,
    /// Starve, remove extinct species, bank food.
    Cleanup,
    /// Terminal.
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Action => "action",
            Phase::Feeding => "feeding",
            Phase::Cleanup => "cleanup",
            Phase::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// What a single feeding step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedStep {
    /// The feed order was empty.
    Idle,
    /// The player had nothing left to feed and left the order.
    Finished(PlayerId),
    /// The dealer fed the player's only option without asking.
    AutoFed(PlayerId),
    /// The player chose a feed and went to the back of the order.
    Fed(PlayerId),
    /// The player chose to stop feeding.
    Declined(PlayerId),
    /// The player answered badly or not at all and was removed.
    Kicked(PlayerId),
}
