//! Card system: trait names, trait cards, and the deck.
//!
//! ## Key Types
//!
//! - `TraitName`: One of the sixteen traits a species can carry
//! - `TraitCard`: A food value paired with a trait name
//! - `Deck`: The ordered draw pile
//!
//! Cards are plain values. Their effects live in `rules` and on
//! `SpeciesBoard`, never on the card itself.

pub mod card;
pub mod deck;
pub mod trait_name;

pub use card::TraitCard;
pub use deck::{Deck, FULL_DECK_SIZE};
pub use trait_name::TraitName;
