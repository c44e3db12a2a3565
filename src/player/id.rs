//! Player identification.
//!
//! Ids are 1-based: the first seat at a table is `PlayerId(1)`.

use serde::{Deserialize, Serialize};

/// Smallest valid player id.
pub const MIN_PLAYER_ID: u32 = 1;

/// Player identifier, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= MIN_PLAYER_ID
    }

    /// Ids for a table of `count` players, seated in order.
    ///
    /// ```
    /// use rust_evo::player::PlayerId;
    ///
    /// let ids: Vec<_> = PlayerId::seats(3).collect();
    /// assert_eq!(ids, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
    /// ```
    pub fn seats(count: usize) -> impl Iterator<Item = PlayerId> {
        (MIN_PLAYER_ID..).take(count).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}
