//! Ordered species lists and board addressing.
//!
//! A player's boards sit in a row; the row order defines who neighbors whom.
//! Warning-call, symbiosis, and cooperation all look at neighbors, so the
//! list owns that relation.

use std::ops::{Index, IndexMut};

use im::Vector;
use serde::{Deserialize, Serialize};

use super::SpeciesBoard;

/// A player's boards, left to right.
///
/// Backed by a persistent vector so snapshots handed to players are O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesList {
    boards: Vector<SpeciesBoard>,
}

impl SpeciesList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&SpeciesBoard> {
        self.boards.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut SpeciesBoard> {
        self.boards.get_mut(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesBoard> {
        self.boards.iter()
    }

    /// Append a board on the right.
    pub fn push(&mut self, board: SpeciesBoard) {
        self.boards.push_back(board);
    }

    pub fn remove(&mut self, idx: usize) -> SpeciesBoard {
        self.boards.remove(idx)
    }

    /// Board directly to the left of `idx`.
    #[must_use]
    pub fn left_neighbor(&self, idx: usize) -> Option<&SpeciesBoard> {
        idx.checked_sub(1).and_then(|left| self.boards.get(left))
    }

    /// Board directly to the right of `idx`.
    #[must_use]
    pub fn right_neighbor(&self, idx: usize) -> Option<&SpeciesBoard> {
        if idx >= self.boards.len() {
            return None;
        }
        self.boards.get(idx + 1)
    }

    /// Total traits across all boards.
    #[must_use]
    pub fn trait_count(&self) -> usize {
        self.boards.iter().map(SpeciesBoard::trait_count).sum()
    }
}

impl Index<usize> for SpeciesList {
    type Output = SpeciesBoard;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.boards[idx]
    }
}

impl IndexMut<usize> for SpeciesList {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.boards[idx]
    }
}

impl FromIterator<SpeciesBoard> for SpeciesList {
    fn from_iter<I: IntoIterator<Item = SpeciesBoard>>(iter: I) -> Self {
        Self {
            boards: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<SpeciesBoard>> for SpeciesList {
    fn from(boards: Vec<SpeciesBoard>) -> Self {
        boards.into_iter().collect()
    }
}

/// Address of a board on the table: whose list, and where in it.
///
/// `owner` is an index into whatever slice of lists the address was computed
/// against, not a player id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardRef {
    pub owner: usize,
    pub board: usize,
}

impl BoardRef {
    #[must_use]
    pub const fn new(owner: usize, board: usize) -> Self {
        Self { owner, board }
    }
}

impl std::fmt::Display for BoardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({}, {})", self.owner, self.board)
    }
}
