//! Feeding-phase decisions.
//!
//! When the dealer cannot feed a player automatically it asks for one of
//! these. Board indices refer to the feeding player's boards; a carnivore's
//! `victim_owner` indexes the other players in the order they were shown:
//! starting with the player after the feeder and wrapping around.

use serde::{Deserialize, Serialize};

use crate::core::{EvoError, Result};
use crate::player::PlayerState;
use crate::species::{SpeciesBoard, SpeciesList};

/// One feeding step's choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedDecision {
    /// Stop feeding for the rest of the round.
    Nothing,
    /// Feed a hungry vegetarian board.
    Vegetarian { board: usize },
    /// Move tokens into a fat-tissue board's store. Zero asks for as many
    /// as the board still needs.
    FatTissue { board: usize, tokens: u32 },
    /// Attack another player's board with a carnivore.
    Carnivore {
        attacker: usize,
        victim_owner: usize,
        victim: usize,
    },
}

impl FeedDecision {
    /// Check the decision against the feeder and the other players' boards.
    pub fn validate(&self, me: &PlayerState, others: &[SpeciesList]) -> Result<()> {
        match *self {
            FeedDecision::Nothing => Ok(()),
            FeedDecision::Vegetarian { board } => {
                let b = own_board(me, board)?;
                if !b.is_vegetarian() {
                    return Err(EvoError::illegal(format!("board {board} is a carnivore")));
                }
                if !b.can_eat_more() {
                    return Err(EvoError::illegal(format!("board {board} is full")));
                }
                Ok(())
            }
            FeedDecision::FatTissue { board, tokens } => {
                let b = own_board(me, board)?;
                if !b.can_store_more() {
                    return Err(EvoError::illegal(format!("board {board} cannot store fat")));
                }
                if tokens > b.fat_need() {
                    return Err(EvoError::illegal(format!(
                        "{tokens} fat tokens for a need of {}",
                        b.fat_need()
                    )));
                }
                Ok(())
            }
            FeedDecision::Carnivore {
                attacker,
                victim_owner,
                victim,
            } => {
                let a = own_board(me, attacker)?;
                let list = others
                    .get(victim_owner)
                    .ok_or_else(|| EvoError::illegal(format!("no player {victim_owner} to attack")))?;
                let target = list
                    .get(victim)
                    .ok_or_else(|| EvoError::illegal(format!("player {victim_owner} has no board {victim}")))?;
                if !a.is_carnivore() || !a.can_eat_more() {
                    return Err(EvoError::illegal(format!("board {attacker} cannot hunt")));
                }
                if !a.can_attack(target, list.left_neighbor(victim), list.right_neighbor(victim)) {
                    return Err(EvoError::illegal(format!(
                        "board {attacker} cannot attack board {victim} of player {victim_owner}"
                    )));
                }
                Ok(())
            }
        }
    }
}

fn own_board(me: &PlayerState, idx: usize) -> Result<&SpeciesBoard> {
    me.board(idx)
        .ok_or_else(|| EvoError::illegal(format!("no board {idx}")))
}
