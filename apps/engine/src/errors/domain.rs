//! Domain-level error type used by the rules, the round state machine and
//! session configuration.
//!
//! This error type knows nothing about decision providers. Provider
//! misbehaviour is modelled by [`crate::ai::AiError`] and is recovered inside
//! the action gate; only `IllegalAction` raised by a direct caller of
//! [`crate::domain::state::RoundState`] is ever a reportable defect.

use thiserror::Error;

/// Why an action was refused by the round state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalActionKind {
    /// Acting player is not the player whose turn it is.
    OutOfTurn,
    /// The state machine is not awaiting an action (round over / game over).
    PhaseMismatch,
    /// A challenge was attempted with no bid on the table.
    NoCurrentBid,
    /// The bid does not exceed the current bid.
    BidNotHigher,
    /// Quantity is zero or exceeds the dice in play.
    QuantityOutOfRange,
    /// Face is outside 1..=6.
    FaceOutOfRange,
    /// Player index is outside the table.
    UnknownPlayer,
    /// Player has no dice left.
    PlayerEliminated,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Wrong turn, wrong phase, or a bid/challenge that fails legality.
    #[error("illegal action {0:?}: {1}")]
    IllegalAction(IllegalActionKind, String),
    /// Raw provider text that does not match the action grammar.
    #[error("parse error: {0}")]
    Parse(String),
    /// Session configuration outside its documented bounds.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn illegal(kind: IllegalActionKind, detail: impl Into<String>) -> Self {
        Self::IllegalAction(kind, detail.into())
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self::Parse(detail.into())
    }

    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig(detail.into())
    }

    /// The illegal-action kind, if this is an `IllegalAction`.
    pub fn illegal_kind(&self) -> Option<&IllegalActionKind> {
        match self {
            DomainError::IllegalAction(kind, _) => Some(kind),
            _ => None,
        }
    }
}
