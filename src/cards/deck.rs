//! The draw pile.
//!
//! The complete card set holds every carnivore food value from -8 to 8 and
//! every other trait at -3 to 3: 17 + 15 * 7 = 122 cards.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{TraitCard, TraitName};
use crate::core::GameRng;

/// Number of cards in the complete set.
pub const FULL_DECK_SIZE: usize = 122;

/// Ordered pool of undealt cards. Draws come off the front.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vector<TraitCard>,
}

impl Deck {
    /// The complete card set, sorted by trait name and then food value.
    #[must_use]
    pub fn full() -> Self {
        let mut cards: Vec<TraitCard> = TraitName::ALL
            .iter()
            .flat_map(|&name| {
                let (lo, hi) = name.food_range();
                (lo..=hi).filter_map(move |value| TraitCard::new(value, name).ok())
            })
            .collect();
        cards.sort();
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// A deck holding exactly these cards, in this order.
    pub fn from_cards(cards: impl IntoIterator<Item = TraitCard>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraitCard> {
        self.cards.iter()
    }

    /// Shuffle the remaining cards.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<TraitCard> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Take up to `n` cards from the front. Returns fewer when the deck
    /// runs out; running out is not an error.
    pub fn draw(&mut self, n: usize) -> Vec<TraitCard> {
        let take = n.min(self.cards.len());
        let rest = self.cards.split_off(take);
        let drawn = std::mem::replace(&mut self.cards, rest);
        drawn.into_iter().collect()
    }

    /// True if every card here also appears in `set` at least as often.
    #[must_use]
    pub fn is_subset_of(cards: &[TraitCard], set: &Deck) -> bool {
        let mut available: FxHashMap<TraitCard, usize> = FxHashMap::default();
        for card in set.iter() {
            *available.entry(*card).or_insert(0) += 1;
        }
        cards.iter().all(|card| match available.get_mut(card) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
    }
}
