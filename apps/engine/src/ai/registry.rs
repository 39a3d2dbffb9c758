//! How to register a provider
//!
//! 1) Implement `DecisionProvider` for your type in its module.
//! 2) Add a new `AiFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same `AiConfig` seed ⇒ same behavior (where applicable).

use std::sync::Arc;

use super::chaos::Chaos;
use super::config::AiConfig;
use super::heuristic::Heuristic;
use super::random::RandomPlayer;
use super::trait_def::DecisionProvider;

/// Factory definition for constructing providers.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(config: &AiConfig) -> Arc<dyn DecisionProvider>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    AiFactory {
        name: Heuristic::NAME,
        version: Heuristic::VERSION,
        make: make_heuristic,
    },
    AiFactory {
        name: Chaos::NAME,
        version: Chaos::VERSION,
        make: make_chaos,
    },
];

/// Returns the statically registered provider factories.
pub fn registered_providers() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Finds a registered factory by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<&'static AiFactory> {
    registered_providers()
        .iter()
        .find(|factory| factory.name.eq_ignore_ascii_case(name))
}

fn make_random_player(config: &AiConfig) -> Arc<dyn DecisionProvider> {
    Arc::new(RandomPlayer::from_config(config))
}

fn make_heuristic(config: &AiConfig) -> Arc<dyn DecisionProvider> {
    Arc::new(Heuristic::from_config(config))
}

fn make_chaos(config: &AiConfig) -> Arc<dyn DecisionProvider> {
    Arc::new(Chaos::from_config(config))
}
