//! Trait cards.
//!
//! A card pairs a food value with a trait name. The food value only matters
//! when the card is discarded to the watering hole during the action phase.

use serde::{Deserialize, Serialize};

use super::TraitName;
use crate::core::{EvoError, Result};

/// A single trait card. Serialized as `[food_value, "trait-name"]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, TraitName)", into = "(i32, TraitName)")]
pub struct TraitCard {
    // Field order gives the derived Ord: by name, then by food value.
    name: TraitName,
    food_value: i32,
}

impl TraitCard {
    /// Create a card, rejecting food values outside the trait's printed range.
    pub fn new(food_value: i32, name: TraitName) -> Result<Self> {
        let (lo, hi) = name.food_range();
        if !(lo..=hi).contains(&food_value) {
            return Err(EvoError::InvalidCard(format!(
                "{name} food value {food_value} outside {lo}..={hi}"
            )));
        }
        Ok(Self { name, food_value })
    }

    #[must_use]
    pub const fn name(&self) -> TraitName {
        self.name
    }

    #[must_use]
    pub const fn food_value(&self) -> i32 {
        self.food_value
    }
}

impl TryFrom<(i32, TraitName)> for TraitCard {
    type Error = EvoError;

    fn try_from((food_value, name): (i32, TraitName)) -> Result<Self> {
        TraitCard::new(food_value, name)
    }
}

impl From<TraitCard> for (i32, TraitName) {
    fn from(card: TraitCard) -> Self {
        (card.food_value, card.name)
    }
}

impl std::fmt::Display for TraitCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.food_value, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_value_ranges() {
        assert!(TraitCard::new(8, TraitName::Carnivore).is_ok());
        assert!(TraitCard::new(-8, TraitName::Carnivore).is_ok());
        assert!(TraitCard::new(9, TraitName::Carnivore).is_err());
        assert!(TraitCard::new(3, TraitName::Foraging).is_ok());
        assert!(TraitCard::new(4, TraitName::Foraging).is_err());
        assert!(TraitCard::new(-4, TraitName::Horns).is_err());
    }

    #[test]
    fn test_ordering_by_name_then_value() {
        let a = TraitCard::new(3, TraitName::Ambush).unwrap();
        let b = TraitCard::new(-3, TraitName::Burrowing).unwrap();
        let c = TraitCard::new(-1, TraitName::Burrowing).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_serde_tuple_form() {
        let card = TraitCard::new(-2, TraitName::LongNeck).unwrap();
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "[-2,\"long-neck\"]");
        let back: TraitCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let parsed: std::result::Result<TraitCard, _> = serde_json::from_str("[5,\"horns\"]");
        assert!(parsed.is_err());
    }
}
