//! Error types.
//!
//! `EvoError` covers every way the engine refuses something: an entity that
//! would violate its invariants, a player decision that breaks the rules, or
//! a player that failed to answer. `DecisionError` is what a decision maker
//! itself reports when it cannot produce an answer.

use thiserror::Error;

use crate::cards::TraitName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvoError {
    #[error("illegal decision: {0}")]
    IllegalDecision(String),

    #[error("board would carry {0} twice")]
    DuplicateTrait(TraitName),

    #[error("invalid species board: {0}")]
    InvalidBoard(String),

    #[error("invalid trait card: {0}")]
    InvalidCard(String),

    #[error("invalid player: {0}")]
    InvalidPlayer(String),

    #[error("invalid dealer setup: {0}")]
    InvalidDealer(String),

    #[error("player did not answer in time")]
    ProtocolTimeout,

    #[error("player disconnected")]
    Disconnected,

    #[error("player declined: {0}")]
    Declined(String),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(String),
}

impl EvoError {
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        EvoError::IllegalDecision(reason.into())
    }

    /// True for failures that get a player removed from the game.
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            EvoError::IllegalDecision(_)
                | EvoError::DuplicateTrait(_)
                | EvoError::ProtocolTimeout
                | EvoError::Disconnected
                | EvoError::Declined(_)
        )
    }
}

impl From<bincode::Error> for EvoError {
    fn from(err: bincode::Error) -> Self {
        EvoError::Snapshot(err.to_string())
    }
}

/// Failure reported by a decision maker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DecisionError(pub String);

impl DecisionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

impl From<DecisionError> for EvoError {
    fn from(err: DecisionError) -> Self {
        EvoError::Declined(err.0)
    }
}

pub type Result<T> = std::result::Result<T, EvoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = EvoError::DuplicateTrait(TraitName::Horns);
        assert_eq!(err.to_string(), "board would carry horns twice");
        assert_eq!(EvoError::ProtocolTimeout.to_string(), "player did not answer in time");
    }

    #[test]
    fn test_decision_error_converts_to_declined() {
        let err: EvoError = DecisionError::new("no idea").into();
        assert_eq!(err, EvoError::Declined("no idea".into()));
        assert!(err.is_protocol_violation());
    }

    #[test]
    fn test_construction_errors_are_not_protocol_violations() {
        assert!(!EvoError::InvalidBoard("x".into()).is_protocol_violation());
        assert!(!EvoError::Snapshot("x".into()).is_protocol_violation());
    }
}
