//! Action phase: what players do with their cards.
//!
//! - `action`: the decision a player submits
//! - `apply`: all-or-nothing validation and application

pub mod action;
pub mod apply;

pub use action::{CardAction, TradeTraits, TurnAction};
pub use apply::{apply, validate};
