//! Decision providers - the untrusted side of every turn.
//!
//! This module provides:
//! - the `DecisionProvider` trait and the types crossing the gate
//! - RandomPlayer: random legal moves (seedable for tests)
//! - Heuristic: deterministic expected-count play
//! - Chaos: deliberately unreliable, for exercising the gate
//! - a static registry for looking providers up by name

mod chaos;
mod config;
mod heuristic;
mod random;
pub mod registry;
mod trait_def;

use std::sync::Arc;

pub use chaos::Chaos;
pub use config::AiConfig;
pub use heuristic::Heuristic;
pub use random::RandomPlayer;
pub use registry::{by_name, registered_providers, AiFactory};
pub use trait_def::{AiError, Candidate, DecisionProvider, RejectReason, Rejection};

/// Create a provider by registered name with the given config.
///
/// Returns `None` if the name is unrecognized.
pub fn create_provider(name: &str, config: &AiConfig) -> Option<Arc<dyn DecisionProvider>> {
    by_name(name).map(|factory| (factory.make)(config))
}
