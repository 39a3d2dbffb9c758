#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dice_engine::domain::rules::DEFAULT_HISTORY_WINDOW;
use dice_engine::domain::{Hand, PlayerId, RoundState, TableSetup};
use dice_engine::{ActionGate, DecisionProvider, GameSession, RetryPolicy};

// Logging is auto-installed for every test binary that includes this module
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub fn setup_for(num_players: usize, wild_ones: bool) -> TableSetup {
    TableSetup {
        num_players,
        starting_dice: 5,
        wild_ones,
        history_window: DEFAULT_HISTORY_WINDOW,
        opening_player: Some(0),
        seed: 7,
    }
}

/// Round 1 from known hands.
pub fn table(hands: Vec<Hand>, opener: PlayerId, wild_ones: bool) -> RoundState {
    RoundState::with_hands(&setup_for(hands.len(), wild_ones), hands, opener)
        .expect("test hands must form a valid table")
}

pub fn gate(budget_ms: u64, max_attempts: u32) -> ActionGate {
    ActionGate::new(Duration::from_millis(budget_ms), RetryPolicy::new(max_attempts))
}

pub fn session(
    state: RoundState,
    providers: Vec<Arc<dyn DecisionProvider>>,
    gate: ActionGate,
) -> GameSession {
    GameSession::from_state(state, providers, gate).expect("provider count matches table")
}
