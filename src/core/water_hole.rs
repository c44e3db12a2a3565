//! The watering hole: the food tokens every species competes for.

use serde::{Deserialize, Serialize};

/// Shared food supply. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaterHole(u32);

impl WaterHole {
    #[must_use]
    pub const fn new(tokens: u32) -> Self {
        Self(tokens)
    }

    #[must_use]
    pub const fn tokens(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Add a card's food value. Negative values remove food, clamping at 0.
    pub fn add_food(&mut self, amount: i32) {
        let next = i64::from(self.0) + i64::from(amount);
        self.0 = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }

    /// Remove one token. Returns false if the hole was already dry.
    pub fn take_one(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        true
    }
}

impl std::fmt::Display for WaterHole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WaterHole({})", self.0)
    }
}
