//! The boundary between the dealer and whoever makes decisions for a seat.
//!
//! ## DecisionMaker
//!
//! Anything that can play: an in-process strategy, a test fake, or a proxy
//! for a remote client. It only ever receives owned snapshots, never the
//! dealer's own state.
//!
//! ## PlayerHandle
//!
//! Runs a decision maker on its own thread and enforces the response
//! deadline. A late, missing, or failed answer comes back as an `EvoError`
//! and the dealer removes the player.

pub mod handle;

pub use handle::PlayerHandle;

use crate::core::DecisionError;
use crate::feed::FeedDecision;
use crate::player::PlayerState;
use crate::species::SpeciesList;
use crate::turn::TurnAction;

/// A player's brain.
///
/// Implementations must be `Send`: each one is moved onto its own worker
/// thread when the game starts.
pub trait DecisionMaker: Send {
    /// Name shown next to the player's score.
    fn name(&self) -> String;

    /// A new round begins. `me` is the player's state after dealing.
    fn start(&mut self, water_hole: u32, me: &PlayerState) {
        let _ = (water_hole, me);
    }

    /// Action-phase decision. `before` and `after` are the boards of the
    /// players seated before and after this one.
    fn choose(
        &mut self,
        before: &[SpeciesList],
        after: &[SpeciesList],
    ) -> Result<TurnAction, DecisionError>;

    /// Feeding-phase decision. `others` is every other player's boards,
    /// starting with the player after this one.
    fn feed_next(
        &mut self,
        me: &PlayerState,
        others: &[SpeciesList],
        water_hole: u32,
    ) -> Result<FeedDecision, DecisionError>;

    /// The game has ended.
    fn game_over(&mut self) {}
}
