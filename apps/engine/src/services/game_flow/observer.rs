//! Per-turn and per-round notifications for logging, UIs and tests.
//!
//! Observers are informational only: they get shared references to events
//! and nothing they do can feed back into the game.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tracing::info;

use crate::domain::action::Action;
use crate::domain::bidding::Bid;
use crate::domain::dice::Hand;
use crate::domain::state::{ChallengeReport, PlayerId, StateSummary};
use crate::services::action_gate::DecisionSource;

/// One applied action and the table it left behind.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub player: PlayerId,
    pub action: Action,
    pub source: DecisionSource,
    pub attempts: u32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
    pub summary: StateSummary,
}

/// A resolved challenge, with every hand revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEvent {
    pub round_no: u32,
    pub challenger: PlayerId,
    pub bid: Bid,
    pub actual_count: u32,
    pub bid_stands: bool,
    pub loser: PlayerId,
    pub eliminated: bool,
    pub revealed: Vec<Hand>,
}

impl From<&ChallengeReport> for RoundEvent {
    fn from(report: &ChallengeReport) -> Self {
        Self {
            round_no: report.round_no,
            challenger: report.challenger,
            bid: report.bid,
            actual_count: report.outcome.actual_count,
            bid_stands: report.outcome.bid_stands,
            loser: report.outcome.loser,
            eliminated: report.eliminated,
            revealed: report.revealed.clone(),
        }
    }
}

pub trait GameObserver: Send + Sync {
    fn on_turn(&self, event: &TurnEvent);

    fn on_round_resolved(&self, event: &RoundEvent);

    fn on_game_over(&self, _winner: Option<PlayerId>, _summary: &StateSummary) {}
}

/// Emits every event as a structured `info!` line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_turn(&self, event: &TurnEvent) {
        info!(
            player = event.player,
            action = %event.action,
            source = ?event.source,
            attempts = event.attempts,
            elapsed_ms = event.elapsed.as_millis() as u64,
            round_no = event.summary.round_no,
            total_dice = event.summary.total_dice,
            "turn"
        );
    }

    fn on_round_resolved(&self, event: &RoundEvent) {
        info!(
            round_no = event.round_no,
            challenger = event.challenger,
            quantity = event.bid.quantity,
            face = event.bid.face,
            actual_count = event.actual_count,
            loser = event.loser,
            eliminated = event.eliminated,
            "round resolved"
        );
    }

    fn on_game_over(&self, winner: Option<PlayerId>, summary: &StateSummary) {
        info!(?winner, rounds = summary.round_no, "game over");
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Recording {
    pub turns: Vec<TurnEvent>,
    pub rounds: Vec<RoundEvent>,
    pub winner: Option<PlayerId>,
    pub finished: bool,
}

/// Keeps every event in memory. Clones share the same recording.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Recording {
        self.inner.lock().clone()
    }

    pub fn turns(&self) -> Vec<TurnEvent> {
        self.inner.lock().turns.clone()
    }

    pub fn rounds(&self) -> Vec<RoundEvent> {
        self.inner.lock().rounds.clone()
    }
}

impl GameObserver for RecordingObserver {
    fn on_turn(&self, event: &TurnEvent) {
        self.inner.lock().turns.push(event.clone());
    }

    fn on_round_resolved(&self, event: &RoundEvent) {
        self.inner.lock().rounds.push(event.clone());
    }

    fn on_game_over(&self, winner: Option<PlayerId>, _summary: &StateSummary) {
        let mut recording = self.inner.lock();
        recording.winner = winner;
        recording.finished = true;
    }
}
