//! # rust-evo
//!
//! A game engine for Evolution: players build species from trait cards,
//! feed them from a shared watering hole or by hunting each other, and
//! score what survives.
//!
//! ## Design Principles
//!
//! 1. **Validate, then apply**: Every decision from a player is checked in
//!    full before any state changes. An illegal decision removes the player
//!    and leaves the table untouched.
//!
//! 2. **Players behind a boundary**: Decision makers run on their own
//!    threads and only see owned snapshots. A late or failed answer is a
//!    protocol violation, never a retry.
//!
//! 3. **Cheap snapshots**: Boards, hands, and the deck use `im-rs`
//!    persistent vectors so handing state to players costs little.
//!
//! ## Modules
//!
//! - `core`: Errors, RNG, dealer configuration, the watering hole
//! - `cards`: Trait names, trait cards, the deck
//! - `species`: Species boards and per-player board lists
//! - `rules`: Attack legality and trait cascades
//! - `player`: Player ids, per-player state, scores
//! - `turn`: Action-phase decisions and their application
//! - `feed`: Feeding decisions and single-step resolution
//! - `external`: The decision-maker boundary
//! - `dealer`: The round state machine

pub mod core;
pub mod cards;
pub mod species;
pub mod rules;
pub mod player;
pub mod turn;
pub mod feed;
pub mod external;
pub mod dealer;

// Re-export commonly used types
pub use crate::core::{DealerConfig, DecisionError, EvoError, GameRng, Result, WaterHole};

pub use crate::cards::{Deck, TraitCard, TraitName};

pub use crate::species::{SpeciesBoard, SpeciesList};

pub use crate::player::{PlayerId, PlayerScore, PlayerState};

pub use crate::turn::{CardAction, TurnAction};

pub use crate::feed::FeedDecision;

pub use crate::external::{DecisionMaker, PlayerHandle};

pub use crate::dealer::{Configuration, Dealer, DealerBuilder, FeedStep, GameOutcome, Phase};
