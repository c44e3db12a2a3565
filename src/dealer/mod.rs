//! The dealer: seats players, runs rounds, ends the game.
//!
//! ## Key Types
//!
//! - `Dealer`: Owns the table and drives the round state machine
//! - `DealerBuilder`: Seats players and validates the table
//! - `Phase`: Where the dealer is within a round
//! - `FeedOrder`: Who feeds next
//! - `Configuration`: Replayable snapshot of the table
//! - `GameOutcome`: Final rankings

pub mod configuration;
pub mod engine;
pub mod feed_order;
pub mod outcome;
pub mod phase;

pub use configuration::Configuration;
pub use engine::{Dealer, DealerBuilder};
pub use feed_order::FeedOrder;
pub use outcome::GameOutcome;
pub use phase::{FeedStep, Phase};
