//! Core engine types: errors, RNG, configuration, the watering hole.
//!
//! These are the leaf building blocks every other module leans on.

pub mod config;
pub mod error;
pub mod rng;
pub mod water_hole;

pub use config::{DealerConfig, DEFAULT_RESPONSE_TIMEOUT, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{DecisionError, EvoError, Result};
pub use rng::GameRng;
pub use water_hole::WaterHole;
