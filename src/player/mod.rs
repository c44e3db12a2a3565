//! Players: ids, per-seat state, and final scores.

pub mod id;
pub mod score;
pub mod state;

pub use id::{PlayerId, MIN_PLAYER_ID};
pub use score::{format_rankings, rank, PlayerScore};
pub use state::{PlayerState, PlayerStateBuilder, UniqueBoard, CARDS_PER_EXTINCTION, CARDS_PER_TURN};
