//! Feeding-cascade triggers.
//!
//! Some traits make a species eat more than the single token it asked for,
//! or make other species eat as a side effect. The predicates here decide
//! *whether* a trigger fires; `PlayerState` and `FeedTable` carry them out.

use serde::{Deserialize, Serialize};

use crate::cards::TraitName;
use crate::species::{SpeciesBoard, SpeciesList};

/// A trait that causes feeding or growth beyond a single requested token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// +1 population before feeding starts.
    Fertile,
    /// Eats one token before feeding starts.
    LongNeck,
    /// Moves stored fat into food before feeding starts.
    FatTissue,
    /// Eats a second token whenever it eats.
    Foraging,
    /// Feeds its right neighbor once for every token it eats.
    Cooperation,
    /// Eats whenever any carnivore completes an attack.
    Scavenger,
}

impl Trigger {
    /// Effects applied to every player, in this order, before the first
    /// feeding query of a round.
    pub const ROUND_START: [Trigger; 3] = [Trigger::Fertile, Trigger::LongNeck, Trigger::FatTissue];

    #[must_use]
    pub const fn trait_name(self) -> TraitName {
        match self {
            Trigger::Fertile => TraitName::Fertile,
            Trigger::LongNeck => TraitName::LongNeck,
            Trigger::FatTissue => TraitName::FatTissue,
            Trigger::Foraging => TraitName::Foraging,
            Trigger::Cooperation => TraitName::Cooperation,
            Trigger::Scavenger => TraitName::Scavenger,
        }
    }

    #[must_use]
    pub fn applies_to(self, board: &SpeciesBoard) -> bool {
        board.has_trait(self.trait_name())
    }
}

/// Index of the board a cooperating species at `idx` passes food to.
#[must_use]
pub fn cooperation_partner(list: &SpeciesList, idx: usize) -> Option<usize> {
    let board = list.get(idx)?;
    if Trigger::Cooperation.applies_to(board) && idx + 1 < list.len() {
        Some(idx + 1)
    } else {
        None
    }
}

/// Whether a board's successful eat is followed by a second attempt.
#[must_use]
pub fn forages(board: &SpeciesBoard) -> bool {
    Trigger::Foraging.applies_to(board)
}
