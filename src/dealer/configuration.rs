//! Replayable game snapshots.
//!
//! A `Configuration` is the full table state between rounds: the players,
//! the watering hole, and the undealt deck. It is enough to build a dealer
//! that continues the game, given decision makers for the seats.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Deck, TraitCard};
use crate::core::{EvoError, Result, WaterHole};
use crate::player::PlayerState;

/// Table state between rounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub players: Vec<PlayerState>,
    pub water_hole: WaterHole,
    pub deck: Deck,
}

impl Configuration {
    /// Check that player ids are unique and that every card on the table
    /// or in the deck comes from one complete set.
    pub fn validate(&self, max_players: usize) -> Result<()> {
        if self.players.len() > max_players {
            return Err(EvoError::InvalidDealer(format!(
                "{} players, at most {max_players}",
                self.players.len()
            )));
        }
        let mut ids = FxHashSet::default();
        for player in &self.players {
            if !ids.insert(player.id()) {
                return Err(EvoError::InvalidDealer(format!("{} seated twice", player.id())));
            }
        }
        let cards: Vec<TraitCard> = self
            .deck
            .iter()
            .chain(self.players.iter().flat_map(|p| p.hand().iter()))
            .copied()
            .collect();
        if !Deck::is_subset_of(&cards, &Deck::full()) {
            return Err(EvoError::InvalidDealer("cards outside the complete set".into()));
        }
        Ok(())
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
