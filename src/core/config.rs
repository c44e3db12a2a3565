//! Dealer configuration.
//!
//! Everything the dealer needs to know that is not part of the game state:
//! how long a player may think, how the deck is shuffled, and how many
//! players a table accepts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fewest players a standard table seats.
pub const MIN_PLAYERS: usize = 3;

/// Most players a standard table seats.
pub const MAX_PLAYERS: usize = 8;

/// Reference deadline for a single player answer.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Dealer configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerConfig {
    /// Deadline for each query sent to a player.
    /// A player that misses it is removed from the game.
    pub response_timeout: Duration,

    /// Seed for the deck shuffle.
    pub seed: u64,

    /// Shuffle the full deck before dealing. Turned off for replays and
    /// tests that need the sorted order.
    pub shuffle_deck: bool,

    /// Minimum number of players accepted at setup.
    pub min_players: usize,

    /// Maximum number of players accepted at setup.
    pub max_players: usize,
}

impl Default for DealerConfig {
    fn default() -> Self {
        Self {
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            seed: 42,
            shuffle_deck: true,
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
        }
    }
}

impl DealerConfig {
    /// Set the per-query deadline.
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable the initial shuffle.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_deck = shuffle;
        self
    }

    /// Set the accepted player count range.
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Whether `count` players may sit at this table.
    #[must_use]
    pub fn accepts_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DealerConfig::default();
        assert_eq!(config.response_timeout, Duration::from_secs(10));
        assert!(config.shuffle_deck);
        assert!(config.accepts_player_count(3));
        assert!(config.accepts_player_count(8));
        assert!(!config.accepts_player_count(2));
        assert!(!config.accepts_player_count(9));
    }

    #[test]
    fn test_builders() {
        let config = DealerConfig::default()
            .with_response_timeout(Duration::from_millis(50))
            .with_seed(9)
            .with_shuffle(false)
            .with_player_range(1, 4);

        assert_eq!(config.response_timeout, Duration::from_millis(50));
        assert_eq!(config.seed, 9);
        assert!(!config.shuffle_deck);
        assert!(config.accepts_player_count(1));
        assert!(!config.accepts_player_count(5));
    }

    #[test]
    fn test_serialization() {
        let config = DealerConfig::default().with_seed(123);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DealerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
