//! Action-phase decisions.
//!
//! During the action phase every player discards one card to the watering
//! hole and may spend further cards on four kinds of card action. All
//! indices refer to the player's hand and boards *as they were when the
//! decision was requested*; boards created by trades are appended after the
//! existing ones in the order the trades appear.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Hand indices of the traits placed on a traded-for board.
pub type TradeTraits = SmallVec<[usize; 3]>;

/// One use of a hand card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardAction {
    /// Spend `card` for +1 population on `board`.
    GrowPopulation { card: usize, board: usize },
    /// Spend `card` for +1 body size on `board`.
    GrowBody { card: usize, board: usize },
    /// Spend `card` on a new board carrying the hand cards at `traits`.
    Trade { card: usize, traits: TradeTraits },
    /// Put `card` in place of the trait in `slot` on `board`.
    ReplaceTrait { card: usize, slot: usize, board: usize },
}

impl CardAction {
    /// The card paying for this action.
    #[must_use]
    pub fn card(&self) -> usize {
        match self {
            CardAction::GrowPopulation { card, .. }
            | CardAction::GrowBody { card, .. }
            | CardAction::Trade { card, .. }
            | CardAction::ReplaceTrait { card, .. } => *card,
        }
    }

    /// Every hand index this action consumes.
    pub fn hand_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let extra: &[usize] = match self {
            CardAction::Trade { traits, .. } => traits.as_slice(),
            _ => &[],
        };
        std::iter::once(self.card()).chain(extra.iter().copied())
    }

    /// Board this action targets, if it targets one.
    #[must_use]
    pub fn target_board(&self) -> Option<usize> {
        match self {
            CardAction::GrowPopulation { board, .. }
            | CardAction::GrowBody { board, .. }
            | CardAction::ReplaceTrait { board, .. } => Some(*board),
            CardAction::Trade { .. } => None,
        }
    }

    /// Position in the fixed application order.
    #[must_use]
    pub const fn apply_rank(&self) -> u8 {
        match self {
            CardAction::Trade { .. } => 0,
            CardAction::ReplaceTrait { .. } => 1,
            CardAction::GrowPopulation { .. } => 2,
            CardAction::GrowBody { .. } => 3,
        }
    }
}

/// A player's whole action-phase decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnAction {
    /// Hand index of the card discarded to the watering hole.
    pub food_card: usize,
    pub actions: Vec<CardAction>,
}

impl TurnAction {
    /// Discard `food_card` and do nothing else.
    #[must_use]
    pub fn new(food_card: usize) -> Self {
        Self {
            food_card,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn grow_population(mut self, card: usize, board: usize) -> Self {
        self.actions.push(CardAction::GrowPopulation { card, board });
        self
    }

    #[must_use]
    pub fn grow_body(mut self, card: usize, board: usize) -> Self {
        self.actions.push(CardAction::GrowBody { card, board });
        self
    }

    #[must_use]
    pub fn trade(mut self, card: usize, traits: impl IntoIterator<Item = usize>) -> Self {
        self.actions.push(CardAction::Trade {
            card,
            traits: traits.into_iter().collect(),
        });
        self
    }

    #[must_use]
    pub fn replace_trait(mut self, card: usize, slot: usize, board: usize) -> Self {
        self.actions.push(CardAction::ReplaceTrait { card, slot, board });
        self
    }

    /// Number of boards this decision creates.
    #[must_use]
    pub fn trade_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, CardAction::Trade { .. }))
            .count()
    }

    /// Every hand index the decision touches, food card first.
    pub fn hand_indices(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.food_card).chain(self.actions.iter().flat_map(CardAction::hand_indices))
    }

    /// Card actions in application order: trades, replacements, population,
    /// then body. Submission order is kept within each kind.
    pub fn in_apply_order(&self) -> Vec<&CardAction> {
        let mut ordered: Vec<&CardAction> = self.actions.iter().collect();
        ordered.sort_by_key(|a| a.apply_rank());
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_indices() {
        let action = TurnAction::new(0)
            .grow_body(1, 0)
            .trade(2, [3, 4])
            .replace_trait(5, 0, 1);

        assert_eq!(action.trade_count(), 1);
        let indices: Vec<_> = action.hand_indices().collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_apply_order_is_stable() {
        let action = TurnAction::new(0)
            .grow_body(1, 0)
            .grow_population(2, 0)
            .replace_trait(3, 0, 0)
            .trade(4, [])
            .grow_population(5, 1);

        let ranks: Vec<_> = action.in_apply_order().iter().map(|a| a.card()).collect();
        assert_eq!(ranks, vec![4, 3, 2, 5, 1]);
    }

    #[test]
    fn test_target_board() {
        assert_eq!(CardAction::GrowBody { card: 0, board: 2 }.target_board(), Some(2));
        let trade = CardAction::Trade { card: 0, traits: TradeTraits::new() };
        assert_eq!(trade.target_board(), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let action = TurnAction::new(1).trade(0, [2]).grow_population(3, 1);
        let json = serde_json::to_string(&action).unwrap();
        let back: TurnAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
