//! Decision provider trait definition.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::action::Action;
use crate::domain::player_view::PlayerView;

/// Errors a provider may report instead of a candidate.
///
/// None of these reach the game: the action gate retries and then falls back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// Provider gave up on its own deadline
    #[error("AI decision timeout")]
    Timeout,
    /// Provider encountered an internal error
    #[error("AI internal error: {0}")]
    Internal(String),
    /// Provider could not find a move it considers valid
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
    /// Provider could not interpret its own output
    #[error("AI parse error: {0}")]
    Parse(String),
}

/// What a provider hands back for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// An already-structured action.
    Structured(Action),
    /// Raw text for the gate's minimal grammar (`CHALLENGE` / `BID <q> <f>`).
    Text(String),
}

impl Candidate {
    pub fn text(text: impl Into<String>) -> Self {
        Candidate::Text(text.into())
    }
}

impl From<Action> for Candidate {
    fn from(action: Action) -> Self {
        Candidate::Structured(action)
    }
}

/// Why the gate refused an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No answer within the time budget.
    Timeout,
    /// The provider returned an error or its task died.
    ProviderFailure(String),
    /// Text output did not match the grammar.
    Parse(String),
    /// Well-formed but not legal on this table.
    Illegal(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Timeout => write!(f, "no answer within the time budget"),
            RejectReason::ProviderFailure(msg) => write!(f, "provider failed: {msg}"),
            RejectReason::Parse(msg) => {
                write!(f, "unreadable answer ({msg}); reply CHALLENGE or BID <quantity> <face>")
            }
            RejectReason::Illegal(msg) => write!(f, "illegal action: {msg}"),
        }
    }
}

/// A rejected attempt, passed back to the provider on retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// 1-based attempt number that was rejected.
    pub attempt: u32,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attempt {} rejected: {}", self.attempt, self.reason)
    }
}

/// Trait for decision providers (bots, models, remote services).
///
/// Implementations receive the view of the player whose turn it is and
/// return a candidate action. They are untrusted: output is validated by the
/// action gate, which runs each call on its own thread and runtime and stops
/// waiting once the time budget is spent. Blocking inside `propose` is
/// allowed; it only ties up that call's thread.
///
/// Calls are independent; the engine never relies on provider-side memory.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Propose an action. `previous` describes why the last attempt in this
    /// turn was rejected, if any.
    async fn propose(
        &self,
        view: &PlayerView,
        previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError>;
}
