#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use ai::{create_provider, AiConfig, AiError, Candidate, DecisionProvider, Rejection};
pub use config::SessionConfig;
pub use domain::{Action, Bid, HistoryEvent, Phase, PlayerId, PlayerView, RoundState};
pub use error::AppError;
pub use errors::{DomainError, IllegalActionKind};
pub use services::action_gate::{decide, ActionGate, Decision, DecisionSource, RetryPolicy};
pub use services::game_flow::{
    GameObserver, GameOutcome, GameSession, RecordingObserver, RoundEvent, TracingObserver,
    TurnEvent,
};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
