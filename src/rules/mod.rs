//! Trait rules as pure functions over boards.
//!
//! - `attack`: which carnivore may attack which board, and which defense
//!   stops it otherwise
//! - `cascade`: which traits make species eat beyond the token they asked for
//!
//! Nothing here mutates state.

pub mod attack;
pub mod cascade;

pub use attack::{attack_size, attackable_targets, blocking_defense, can_attack, Defense};
pub use cascade::{cooperation_partner, forages, Trigger};
