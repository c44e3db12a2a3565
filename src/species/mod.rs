//! Species boards and the ordered lists that hold them.

pub mod board;
pub mod list;

pub use board::{SpeciesBoard, SpeciesBoardBuilder, TraitSlots, MAX_BODY, MAX_POPULATION, MAX_TRAITS};
pub use list::{BoardRef, SpeciesList};
