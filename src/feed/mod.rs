//! Feeding phase: decisions and the table they are resolved against.

pub mod decision;
pub mod table;

pub use decision::FeedDecision;
pub use table::{AutoFeed, FeedStatus, FeedTable};
