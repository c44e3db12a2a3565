//! Validation and application of action-phase decisions.
//!
//! A decision is planned against copies of the player's boards and hand.
//! Only a plan that succeeds end to end is committed, so an illegal decision
//! never leaves a half-applied player behind.

use im::Vector;
use rustc_hash::FxHashSet;

use super::{CardAction, TurnAction};
use crate::cards::{TraitCard, TraitName};
use crate::core::{EvoError, Result, WaterHole};
use crate::player::PlayerState;
use crate::species::{SpeciesBoard, SpeciesList, MAX_TRAITS};

/// Boards and hand after a decision, plus the food value sent to the
/// watering hole.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Plan {
    boards: SpeciesList,
    hand: Vector<TraitCard>,
    food: i32,
}

/// Check a decision against the player it came from.
pub fn validate(action: &TurnAction, player: &PlayerState) -> Result<()> {
    plan(action, player).map(|_| ())
}

/// Validate and apply a decision. On error nothing changes.
pub fn apply(action: &TurnAction, player: &mut PlayerState, water_hole: &mut WaterHole) -> Result<()> {
    let Plan { boards, hand, food } = plan(action, player)?;
    water_hole.add_food(food);
    player.commit_turn(boards, hand);
    Ok(())
}

fn check_indices(action: &TurnAction, player: &PlayerState) -> Result<()> {
    let hand = player.hand();
    let mut used = FxHashSet::default();
    for idx in action.hand_indices() {
        if idx >= hand.len() {
            return Err(EvoError::illegal(format!("card {idx} not in a hand of {}", hand.len())));
        }
        if !used.insert(idx) {
            return Err(EvoError::illegal(format!("card {idx} used twice")));
        }
    }

    let board_count = player.boards().len() + action.trade_count();
    for card_action in &action.actions {
        match card_action {
            CardAction::Trade { traits, .. } if traits.len() > MAX_TRAITS => {
                return Err(EvoError::illegal(format!("trade for {} traits", traits.len())));
            }
            CardAction::ReplaceTrait { slot, .. } if *slot >= MAX_TRAITS => {
                return Err(EvoError::illegal(format!("trait slot {slot}")));
            }
            _ => {}
        }
        if let Some(board) = card_action.target_board() {
            if board >= board_count {
                return Err(EvoError::illegal(format!("board {board} of {board_count}")));
            }
        }
    }

    let mut replaced: Vec<(usize, TraitName)> = Vec::new();
    for card_action in &action.actions {
        if let CardAction::ReplaceTrait { card, board, .. } = card_action {
            let entry = (*board, hand[*card].name());
            if replaced.contains(&entry) {
                return Err(EvoError::DuplicateTrait(entry.1));
            }
            replaced.push(entry);
        }
    }
    Ok(())
}

fn plan(action: &TurnAction, player: &PlayerState) -> Result<Plan> {
    check_indices(action, player)?;

    let hand = player.hand();
    let mut boards = player.boards().clone();
    for card_action in action.in_apply_order() {
        match card_action {
            CardAction::Trade { traits, .. } => {
                let board = SpeciesBoard::builder()
                    .traits(traits.iter().map(|&idx| hand[idx]))
                    .build()?;
                boards.push(board);
            }
            CardAction::ReplaceTrait { card, slot, board } => {
                board_mut(&mut boards, *board)?.replace_card(*slot, hand[*card])?;
            }
            CardAction::GrowPopulation { board, .. } => {
                board_mut(&mut boards, *board)?.increase_population();
            }
            CardAction::GrowBody { board, .. } => {
                board_mut(&mut boards, *board)?.increase_body_size();
            }
        }
    }

    let used: FxHashSet<usize> = action.hand_indices().collect();
    let remaining = hand
        .iter()
        .enumerate()
        .filter(|(idx, _)| !used.contains(idx))
        .map(|(_, card)| *card)
        .collect();

    Ok(Plan {
        boards,
        hand: remaining,
        food: hand[action.food_card].food_value(),
    })
}

fn board_mut(boards: &mut SpeciesList, idx: usize) -> Result<&mut SpeciesBoard> {
    boards
        .get_mut(idx)
        .ok_or_else(|| EvoError::illegal(format!("board {idx} does not exist")))
}
