//! Feeding order.
//!
//! Players take turns feeding one step at a time. After each feed the
//! player moves to the back; a player that cannot or will not feed leaves
//! the order for the rest of the round.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Queue of players still feeding this round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedOrder(VecDeque<PlayerId>);

impl FeedOrder {
    pub fn new(ids: impl IntoIterator<Item = PlayerId>) -> Self {
        Self(ids.into_iter().collect())
    }

    #[must_use]
    pub fn first(&self) -> Option<PlayerId> {
        self.0.front().copied()
    }

    /// Move the first player to the back.
    pub fn rotate(&mut self) {
        self.0.rotate_left(usize::from(!self.0.is_empty()));
    }

    pub fn remove(&mut self, id: PlayerId) {
        self.0.retain(|&p| p != id);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.0.iter().copied()
    }
}
