//! One feeding step's view of the table.
//!
//! `FeedTable` borrows the dealer's players, watering hole, and deck for the
//! duration of a single step and resolves everything that step can cause:
//! the feed itself, a carnivore's kill and the horns that answer it, and the
//! scavengers that eat afterwards.
//!
//! ## Player order
//!
//! The feeder sees the other players rotated so it would sit last: the
//! player after it comes first. `victim_owner` indices in decisions refer to
//! that order. Scavengers eat in table order starting with the feeder.

use log::debug;

use super::FeedDecision;
use crate::cards::Deck;
use crate::core::{Result, WaterHole};
use crate::player::{PlayerState, UniqueBoard};
use crate::rules::attack;
use crate::species::SpeciesList;

/// Outcome of trying to feed without asking the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoFeed {
    /// The only possible feed was made.
    Fed,
    /// There is a real choice; the player must be asked.
    NeedsQuery,
}

/// What the feed order should do with the feeder after its decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedStatus {
    /// Move the feeder to the back of the order.
    Rotate,
    /// The feeder is finished for this round.
    Done,
}

/// Mutable feeding context for one step.
pub struct FeedTable<'a> {
    players: &'a mut [PlayerState],
    feeder: usize,
    water_hole: &'a mut WaterHole,
    deck: &'a mut Deck,
}

impl<'a> FeedTable<'a> {
    /// `feeder` is an index into `players`.
    pub fn new(
        players: &'a mut [PlayerState],
        feeder: usize,
        water_hole: &'a mut WaterHole,
        deck: &'a mut Deck,
    ) -> Self {
        Self {
            players,
            feeder,
            water_hole,
            deck,
        }
    }

    #[must_use]
    pub fn feeder(&self) -> &PlayerState {
        &self.players[self.feeder]
    }

    /// Indices of the other players, starting after the feeder.
    #[must_use]
    pub fn others_order(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..n).map(|offset| (self.feeder + offset) % n).collect()
    }

    /// The other players' boards in `others_order`.
    #[must_use]
    pub fn other_boards(&self) -> Vec<SpeciesList> {
        self.others_order()
            .into_iter()
            .map(|idx| self.players[idx].boards().clone())
            .collect()
    }

    #[must_use]
    pub fn can_feed(&self) -> bool {
        self.feeder().can_feed(&self.other_boards())
    }

    /// Feed without asking when exactly one feed is possible.
    ///
    /// The feeder must have exactly one board that can eat or store. A fat
    /// board always needs a query since the amount is a choice. A vegetarian
    /// simply eats. A carnivore attacks only when a single target exists.
    pub fn auto_feed(&mut self) -> AutoFeed {
        let hungry = self
            .feeder()
            .find_unique(|b| b.can_eat_more() || b.can_store_more());
        let UniqueBoard::One(idx) = hungry else {
            return AutoFeed::NeedsQuery;
        };
        let board = &self.players[self.feeder].boards()[idx];
        if board.can_store_more() {
            return AutoFeed::NeedsQuery;
        }
        if board.is_vegetarian() {
            debug!("{} autofeeds vegetarian board {idx}", self.feeder().id());
            self.players[self.feeder].feed_species(idx, self.water_hole);
            return AutoFeed::Fed;
        }

        let targets = attack::attackable_targets(board, &self.other_boards());
        match targets.as_slice() {
            [only] => {
                debug!(
                    "{} autofeeds carnivore board {idx} on {}",
                    self.feeder().id(),
                    only
                );
                self.feed_carnivore(idx, only.owner, only.board);
                AutoFeed::Fed
            }
            _ => AutoFeed::NeedsQuery,
        }
    }

    /// Validate and carry out a player's decision.
    pub fn apply(&mut self, decision: FeedDecision) -> Result<FeedStatus> {
        decision.validate(self.feeder(), &self.other_boards())?;
        let feeder = self.feeder;
        match decision {
            FeedDecision::Nothing => return Ok(FeedStatus::Done),
            FeedDecision::Vegetarian { board } => {
                self.players[feeder].feed_species(board, self.water_hole);
            }
            FeedDecision::FatTissue { board, tokens } => {
                let wanted = match tokens {
                    0 => self.players[feeder].boards()[board].fat_need(),
                    n => n,
                };
                self.players[feeder].store_fat(board, wanted, self.water_hole);
            }
            FeedDecision::Carnivore {
                attacker,
                victim_owner,
                victim,
            } => {
                self.feed_carnivore(attacker, victim_owner, victim);
            }
        }
        Ok(FeedStatus::Rotate)
    }

    /// Attack `victim_owner`'s (an `others_order` index) board `victim` with
    /// the feeder's board `attacker`, then let scavengers eat if the
    /// attacker did. Returns whether the attacker ate.
    pub fn feed_carnivore(&mut self, attacker: usize, victim_owner: usize, victim: usize) -> bool {
        let Some(owner_idx) = self.others_order().get(victim_owner).copied() else {
            return false;
        };
        let (hunter, prey) = pair_mut(self.players, self.feeder, owner_idx);
        let ate = hunter.feed_carnivore(attacker, prey, victim, self.water_hole, self.deck);
        debug!(
            "{} board {attacker} attacks {} board {victim}, ate: {ate}",
            hunter.id(),
            prey.id()
        );
        if ate {
            self.feed_scavengers();
        }
        ate
    }

    /// Every scavenger at the table eats once, starting with the feeder.
    pub fn feed_scavengers(&mut self) {
        let n = self.players.len();
        for offset in 0..n {
            self.players[(self.feeder + offset) % n].feed_scavengers(self.water_hole);
        }
    }
}

/// Two distinct mutable players out of one slice.
fn pair_mut(players: &mut [PlayerState], a: usize, b: usize) -> (&mut PlayerState, &mut PlayerState) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
