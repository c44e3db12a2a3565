//! Species boards.
//!
//! A board tracks one species: how many members it has, how big they are,
//! how much they ate this round, and up to three trait cards. Every board
//! that escapes this module satisfies:
//!
//! - `1 <= population <= 7` (0 only transiently, right before removal)
//! - `0 <= body <= 7`
//! - `0 <= food <= population`
//! - at most 3 traits, no trait name twice
//! - `fat_food > 0` only with fat-tissue, and never above `body`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{TraitCard, TraitName};
use crate::core::{EvoError, Result, WaterHole};
use crate::rules::attack;
use crate::species::SpeciesList;

pub const MAX_POPULATION: u32 = 7;
pub const MIN_POPULATION: u32 = 1;
pub const MAX_BODY: u32 = 7;
pub const MAX_TRAITS: usize = 3;

/// Trait cards on a single board.
pub type TraitSlots = SmallVec<[TraitCard; MAX_TRAITS]>;

/// One species on the table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard", into = "RawBoard")]
pub struct SpeciesBoard {
    food: u32,
    body: u32,
    population: u32,
    traits: TraitSlots,
    fat_food: u32,
}

impl Default for SpeciesBoard {
    /// A freshly placed board: one member, body 0, no traits.
    fn default() -> Self {
        Self {
            food: 0,
            body: 0,
            population: MIN_POPULATION,
            traits: TraitSlots::new(),
            fat_food: 0,
        }
    }
}

impl SpeciesBoard {
    #[must_use]
    pub fn builder() -> SpeciesBoardBuilder {
        SpeciesBoardBuilder::default()
    }

    // === Queries ===

    #[must_use]
    pub const fn food(&self) -> u32 {
        self.food
    }

    #[must_use]
    pub const fn body(&self) -> u32 {
        self.body
    }

    #[must_use]
    pub const fn population(&self) -> u32 {
        self.population
    }

    #[must_use]
    pub const fn fat_food(&self) -> u32 {
        self.fat_food
    }

    #[must_use]
    pub fn traits(&self) -> &[TraitCard] {
        &self.traits
    }

    #[must_use]
    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }

    #[must_use]
    pub fn has_trait(&self, name: TraitName) -> bool {
        self.traits.iter().any(|card| card.name() == name)
    }

    #[must_use]
    pub fn is_carnivore(&self) -> bool {
        self.has_trait(TraitName::Carnivore)
    }

    #[must_use]
    pub fn is_vegetarian(&self) -> bool {
        !self.is_carnivore()
    }

    #[must_use]
    pub fn is_fat(&self) -> bool {
        self.has_trait(TraitName::FatTissue)
    }

    #[must_use]
    pub const fn is_extinct(&self) -> bool {
        self.population == 0
    }

    #[must_use]
    pub const fn can_eat_more(&self) -> bool {
        self.food < self.population
    }

    /// Room left in fat storage. Zero without fat-tissue.
    #[must_use]
    pub fn fat_need(&self) -> u32 {
        if self.is_fat() {
            self.body.saturating_sub(self.fat_food)
        } else {
            0
        }
    }

    #[must_use]
    pub fn can_store_more(&self) -> bool {
        self.fat_need() > 0
    }

    /// Whether this board may attack `defender`, whose neighbors on its own
    /// player's table are `left` and `right`.
    #[must_use]
    pub fn can_attack(
        &self,
        defender: &SpeciesBoard,
        left: Option<&SpeciesBoard>,
        right: Option<&SpeciesBoard>,
    ) -> bool {
        attack::can_attack(self, defender, left, right)
    }

    /// Whether any board in any of the lists can be attacked.
    #[must_use]
    pub fn can_attack_any(&self, lists: &[SpeciesList]) -> bool {
        lists.iter().any(|list| {
            (0..list.len()).any(|idx| {
                self.can_attack(&list[idx], list.left_neighbor(idx), list.right_neighbor(idx))
            })
        })
    }

    // === Feeding ===

    /// Take one token from the watering hole. Fails when the species is full
    /// or the hole is dry.
    pub fn eat(&mut self, water_hole: &mut WaterHole) -> bool {
        if !self.can_eat_more() || !water_hole.take_one() {
            return false;
        }
        self.food += 1;
        true
    }

    /// Move up to `tokens` from the watering hole into fat storage.
    /// Returns how many were moved.
    pub fn store(&mut self, tokens: u32, water_hole: &mut WaterHole) -> u32 {
        let mut moved = 0;
        while moved < tokens && self.can_store_more() && water_hole.take_one() {
            self.fat_food += 1;
            moved += 1;
        }
        moved
    }

    /// Move stored fat into food until the species is full or the store is empty.
    pub fn eat_stored_food(&mut self) {
        let moved = self.fat_food.min(self.population.saturating_sub(self.food));
        self.food += moved;
        self.fat_food -= moved;
    }

    // === Growth and loss ===

    pub fn increase_population(&mut self) {
        if self.population < MAX_POPULATION {
            self.population += 1;
        }
    }

    pub fn increase_body_size(&mut self) {
        if self.body < MAX_BODY {
            self.body += 1;
        }
    }

    /// Lose one member. Food above the new population is lost with it.
    pub fn decrease_population(&mut self) {
        self.population = self.population.saturating_sub(1);
        self.food = self.food.min(self.population);
    }

    /// Starve unfed members. Returns the food eaten this round, which goes
    /// to the owner's bag.
    pub fn end_of_round(&mut self) -> u32 {
        let eaten = self.food;
        self.population = self.food;
        self.food = 0;
        eaten
    }

    // === Traits ===

    /// Swap the card in `slot` for `card`, returning the removed card.
    ///
    /// Replacing fat-tissue empties the fat store.
    pub fn replace_card(&mut self, slot: usize, card: TraitCard) -> Result<TraitCard> {
        let current = self
            .traits
            .get(slot)
            .copied()
            .ok_or_else(|| EvoError::illegal(format!("no trait in slot {slot}")))?;
        if current.name() != card.name() && self.has_trait(card.name()) {
            return Err(EvoError::DuplicateTrait(card.name()));
        }
        self.traits[slot] = card;
        if current.name() == TraitName::FatTissue {
            self.fat_food = 0;
        }
        Ok(current)
    }
}

/// Validating builder for [`SpeciesBoard`].
#[derive(Clone, Debug)]
pub struct SpeciesBoardBuilder {
    food: u32,
    body: u32,
    population: u32,
    traits: Vec<TraitCard>,
    fat_food: u32,
}

impl Default for SpeciesBoardBuilder {
    fn default() -> Self {
        Self {
            food: 0,
            body: 0,
            population: MIN_POPULATION,
            traits: Vec::new(),
            fat_food: 0,
        }
    }
}

impl SpeciesBoardBuilder {
    #[must_use]
    pub fn food(mut self, food: u32) -> Self {
        self.food = food;
        self
    }

    #[must_use]
    pub fn body(mut self, body: u32) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn population(mut self, population: u32) -> Self {
        self.population = population;
        self
    }

    #[must_use]
    pub fn traits(mut self, traits: impl IntoIterator<Item = TraitCard>) -> Self {
        self.traits = traits.into_iter().collect();
        self
    }

    /// Traits given by name only, carried on food-value-0 cards.
    #[must_use]
    pub fn trait_names(mut self, names: impl IntoIterator<Item = TraitName>) -> Self {
        self.traits = names
            .into_iter()
            .filter_map(|name| TraitCard::new(0, name).ok())
            .collect();
        self
    }

    #[must_use]
    pub fn fat_food(mut self, fat_food: u32) -> Self {
        self.fat_food = fat_food;
        self
    }

    pub fn build(self) -> Result<SpeciesBoard> {
        if !(MIN_POPULATION..=MAX_POPULATION).contains(&self.population) {
            return Err(EvoError::InvalidBoard(format!(
                "population {} outside {MIN_POPULATION}..={MAX_POPULATION}",
                self.population
            )));
        }
        if self.body > MAX_BODY {
            return Err(EvoError::InvalidBoard(format!("body {} above {MAX_BODY}", self.body)));
        }
        if self.food > self.population {
            return Err(EvoError::InvalidBoard(format!(
                "food {} above population {}",
                self.food, self.population
            )));
        }
        if self.traits.len() > MAX_TRAITS {
            return Err(EvoError::InvalidBoard(format!("{} traits", self.traits.len())));
        }
        for (i, card) in self.traits.iter().enumerate() {
            if self.traits[..i].iter().any(|c| c.name() == card.name()) {
                return Err(EvoError::DuplicateTrait(card.name()));
            }
        }
        let fat = self.traits.iter().any(|c| c.name() == TraitName::FatTissue);
        if self.fat_food > 0 && (!fat || self.fat_food > self.body) {
            return Err(EvoError::InvalidBoard(format!(
                "fat food {} with body {}",
                self.fat_food, self.body
            )));
        }
        Ok(SpeciesBoard {
            food: self.food,
            body: self.body,
            population: self.population,
            traits: self.traits.into_iter().collect(),
            fat_food: self.fat_food,
        })
    }
}

/// Unchecked serialized form of a board.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawBoard {
    food: u32,
    body: u32,
    population: u32,
    traits: Vec<TraitCard>,
    #[serde(default, rename = "fat-food")]
    fat_food: u32,
}

impl TryFrom<RawBoard> for SpeciesBoard {
    type Error = EvoError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        SpeciesBoard::builder()
            .food(raw.food)
            .body(raw.body)
            .population(raw.population)
            .traits(raw.traits)
            .fat_food(raw.fat_food)
            .build()
    }
}

impl From<SpeciesBoard> for RawBoard {
    fn from(board: SpeciesBoard) -> Self {
        RawBoard {
            food: board.food,
            body: board.body,
            population: board.population,
            traits: board.traits.into_vec(),
            fat_food: board.fat_food,
        }
    }
}

impl std::fmt::Display for SpeciesBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Species(food {}, body {}, pop {}, fat {}, [",
            self.food, self.body, self.population, self.fat_food
        )?;
        for (i, card) in self.traits.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", card.name())?;
        }
        f.write_str("])")
    }
}
