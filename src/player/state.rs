//! Per-player game state.
//!
//! A `PlayerState` is everything the dealer knows about one seat: its boards
//! in table order, its hand, and the food bag that becomes its score. The
//! decision maker behind the seat lives elsewhere (`external`) and only ever
//! sees clones of this.
//!
//! ## Feeding
//!
//! `feed_species` is the single entry point for a board eating from the
//! watering hole. Foraging and cooperation are resolved inside it, so every
//! path that feeds a board (manual choice, autofeed, long-neck, scavenger,
//! a carnivore after its kill) gets the same cascade.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::cards::{Deck, TraitCard, TraitName};
use crate::core::{EvoError, Result, WaterHole};
use crate::rules::{cascade, Trigger};
use crate::species::{SpeciesBoard, SpeciesList};

/// Cards dealt every round before counting boards.
pub const CARDS_PER_TURN: usize = 3;

/// Cards drawn when a board goes extinct.
pub const CARDS_PER_EXTINCTION: usize = 2;

/// Result of looking for exactly one board matching a predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniqueBoard {
    None,
    One(usize),
    Many,
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayer", into = "RawPlayer")]
pub struct PlayerState {
    id: PlayerId,
    boards: SpeciesList,
    hand: Vector<TraitCard>,
    bag: u32,
}

impl PlayerState {
    /// A player with no boards, no cards, and an empty bag.
    pub fn new(id: PlayerId) -> Result<Self> {
        Self::builder(id).build()
    }

    #[must_use]
    pub fn builder(id: PlayerId) -> PlayerStateBuilder {
        PlayerStateBuilder {
            id,
            boards: SpeciesList::new(),
            hand: Vec::new(),
            bag: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub const fn boards(&self) -> &SpeciesList {
        &self.boards
    }

    #[must_use]
    pub fn board(&self, idx: usize) -> Option<&SpeciesBoard> {
        self.boards.get(idx)
    }

    #[must_use]
    pub const fn hand(&self) -> &Vector<TraitCard> {
        &self.hand
    }

    #[must_use]
    pub const fn bag(&self) -> u32 {
        self.bag
    }

    /// `bag + Σ(population + traits)` over living boards.
    #[must_use]
    pub fn score(&self) -> u32 {
        let on_table: usize = self
            .boards
            .iter()
            .map(|b| b.population() as usize + b.trait_count())
            .sum();
        self.bag + u32::try_from(on_table).unwrap_or(u32::MAX)
    }

    /// Cards this player is dealt at the start of a round.
    #[must_use]
    pub fn cards_needed(&self) -> usize {
        CARDS_PER_TURN + self.boards.len().max(1)
    }

    // === Round lifecycle ===

    /// Place a fresh board if the player has none, then take the dealt cards.
    pub fn start_round(&mut self, cards: impl IntoIterator<Item = TraitCard>) {
        if self.boards.is_empty() {
            self.add_new_species();
        }
        self.hand.extend(cards);
    }

    pub fn add_new_species(&mut self) {
        self.boards.push(SpeciesBoard::default());
    }

    /// Starve unfed members of every board. Extinct boards are removed and
    /// replaced by cards; food eaten by survivors goes to the bag.
    ///
    /// Returns the food added to the bag.
    pub fn end_turn(&mut self, deck: &mut Deck) -> u32 {
        let mut to_bag = 0;
        let mut extinct = 0;
        let survivors: SpeciesList = self
            .boards
            .iter()
            .cloned()
            .filter_map(|mut board| {
                let eaten = board.end_of_round();
                if board.is_extinct() {
                    extinct += 1;
                    None
                } else {
                    to_bag += eaten;
                    Some(board)
                }
            })
            .collect();
        self.boards = survivors;
        for _ in 0..extinct {
            self.hand.extend(deck.draw(CARDS_PER_EXTINCTION));
        }
        self.bag += to_bag;
        to_bag
    }

    // === Feeding ===

    /// Whether any board could still take food this round, given the other
    /// players' boards as attack targets.
    #[must_use]
    pub fn can_feed(&self, others: &[SpeciesList]) -> bool {
        self.boards.iter().any(|b| {
            b.can_store_more()
                || (b.can_eat_more() && b.is_vegetarian())
                || (b.can_eat_more() && b.is_carnivore() && b.can_attack_any(others))
        })
    }

    /// Find the only board satisfying `pred`.
    pub fn find_unique(&self, pred: impl Fn(&SpeciesBoard) -> bool) -> UniqueBoard {
        let mut found = UniqueBoard::None;
        for (idx, board) in self.boards.iter().enumerate() {
            if pred(board) {
                if found != UniqueBoard::None {
                    return UniqueBoard::Many;
                }
                found = UniqueBoard::One(idx);
            }
        }
        found
    }

    /// Feed one token to board `idx`, then resolve foraging and cooperation.
    ///
    /// Returns whether the board ate its first token.
    pub fn feed_species(&mut self, idx: usize, water_hole: &mut WaterHole) -> bool {
        let Some(board) = self.boards.get_mut(idx) else {
            return false;
        };
        if !board.eat(water_hole) {
            return false;
        }
        let foraged = cascade::forages(board) && board.eat(water_hole);
        if foraged {
            self.cooperate(idx, water_hole);
        }
        self.cooperate(idx, water_hole);
        true
    }

    fn cooperate(&mut self, idx: usize, water_hole: &mut WaterHole) {
        if let Some(partner) = cascade::cooperation_partner(&self.boards, idx) {
            self.feed_species(partner, water_hole);
        }
    }

    /// Move up to `tokens` into board `idx`'s fat store.
    pub fn store_fat(&mut self, idx: usize, tokens: u32, water_hole: &mut WaterHole) -> u32 {
        self.boards
            .get_mut(idx)
            .map_or(0, |board| board.store(tokens, water_hole))
    }

    pub fn eat_stored_food(&mut self, idx: usize) {
        if let Some(board) = self.boards.get_mut(idx) {
            board.eat_stored_food();
        }
    }

    /// Remove one member from board `idx`. An extinct board is removed and
    /// its owner draws replacement cards. Returns whether it went extinct.
    pub fn decrease_population(&mut self, idx: usize, deck: &mut Deck) -> bool {
        let Some(board) = self.boards.get_mut(idx) else {
            return false;
        };
        board.decrease_population();
        if board.is_extinct() {
            self.boards.remove(idx);
            self.hand.extend(deck.draw(CARDS_PER_EXTINCTION));
            return true;
        }
        false
    }

    /// Board `attacker` kills one member of `victim_owner`'s board `victim`.
    ///
    /// Horns cost the attacker a member too; if that kills it, nothing is
    /// eaten. Returns whether the attacker ate.
    pub fn feed_carnivore(
        &mut self,
        attacker: usize,
        victim_owner: &mut PlayerState,
        victim: usize,
        water_hole: &mut WaterHole,
        deck: &mut Deck,
    ) -> bool {
        if !self.board(attacker).is_some_and(SpeciesBoard::is_carnivore) {
            return false;
        }
        let Some(horned) = victim_owner
            .board(victim)
            .map(|b| b.has_trait(TraitName::Horns))
        else {
            return false;
        };

        victim_owner.decrease_population(victim, deck);
        if horned && self.decrease_population(attacker, deck) {
            return false;
        }
        self.feed_species(attacker, water_hole)
    }

    // === Whole-player trait effects ===

    /// Apply one of the round-start effects to every matching board.
    pub fn apply_round_start(&mut self, trigger: Trigger, water_hole: &mut WaterHole) {
        for idx in 0..self.boards.len() {
            if !trigger.applies_to(&self.boards[idx]) {
                continue;
            }
            match trigger {
                Trigger::Fertile => self.boards[idx].increase_population(),
                Trigger::LongNeck => {
                    self.feed_species(idx, water_hole);
                }
                Trigger::FatTissue => self.eat_stored_food(idx),
                Trigger::Foraging | Trigger::Cooperation | Trigger::Scavenger => {}
            }
        }
    }

    /// Every scavenger board eats once.
    pub fn feed_scavengers(&mut self, water_hole: &mut WaterHole) {
        for idx in 0..self.boards.len() {
            if Trigger::Scavenger.applies_to(&self.boards[idx]) {
                self.feed_species(idx, water_hole);
            }
        }
    }

    /// Replace boards and hand wholesale after a validated turn action.
    pub(crate) fn commit_turn(&mut self, boards: SpeciesList, hand: Vector<TraitCard>) {
        self.boards = boards;
        self.hand = hand;
    }
}

/// Validating builder for [`PlayerState`].
#[derive(Clone, Debug)]
pub struct PlayerStateBuilder {
    id: PlayerId,
    boards: SpeciesList,
    hand: Vec<TraitCard>,
    bag: u32,
}

impl PlayerStateBuilder {
    #[must_use]
    pub fn boards(mut self, boards: impl IntoIterator<Item = SpeciesBoard>) -> Self {
        self.boards = boards.into_iter().collect();
        self
    }

    #[must_use]
    pub fn hand(mut self, hand: impl IntoIterator<Item = TraitCard>) -> Self {
        self.hand = hand.into_iter().collect();
        self
    }

    #[must_use]
    pub fn bag(mut self, bag: u32) -> Self {
        self.bag = bag;
        self
    }

    pub fn build(self) -> Result<PlayerState> {
        if !self.id.is_valid() {
            return Err(EvoError::InvalidPlayer(format!("id {} below 1", self.id.raw())));
        }
        Ok(PlayerState {
            id: self.id,
            boards: self.boards,
            hand: self.hand.into_iter().collect(),
            bag: self.bag,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawPlayer {
    id: PlayerId,
    species: SpeciesList,
    bag: u32,
    #[serde(default)]
    cards: Vec<TraitCard>,
}

impl TryFrom<RawPlayer> for PlayerState {
    type Error = EvoError;

    fn try_from(raw: RawPlayer) -> Result<Self> {
        PlayerState::builder(raw.id)
            .boards(raw.species.iter().cloned())
            .hand(raw.cards)
            .bag(raw.bag)
            .build()
    }
}

impl From<PlayerState> for RawPlayer {
    fn from(player: PlayerState) -> Self {
        RawPlayer {
            id: player.id,
            species: player.boards,
            bag: player.bag,
            cards: player.hand.into_iter().collect(),
        }
    }
}
