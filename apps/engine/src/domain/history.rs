//! Append-only event records kept by the round state machine.
//!
//! The log is public information: it never contains a player's hidden dice.
//! It serializes as an ordered JSON array for replay and debugging.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Bid;
use crate::domain::state::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEvent {
    RoundStarted {
        round_no: u32,
        opener: PlayerId,
        dice_counts: Vec<u32>,
    },
    BidPlaced {
        round_no: u32,
        bid: Bid,
    },
    ChallengeResolved {
        round_no: u32,
        challenger: PlayerId,
        bid: Bid,
        actual_count: u32,
        bid_stands: bool,
        loser: PlayerId,
    },
    PlayerEliminated {
        round_no: u32,
        player: PlayerId,
    },
    GameOver {
        round_no: u32,
        winner: PlayerId,
    },
}

impl HistoryEvent {
    pub fn round_no(&self) -> u32 {
        match self {
            HistoryEvent::RoundStarted { round_no, .. }
            | HistoryEvent::BidPlaced { round_no, .. }
            | HistoryEvent::ChallengeResolved { round_no, .. }
            | HistoryEvent::PlayerEliminated { round_no, .. }
            | HistoryEvent::GameOver { round_no, .. } => *round_no,
        }
    }
}

/// The last `window` events, oldest first.
pub fn recent(history: &[HistoryEvent], window: usize) -> &[HistoryEvent] {
    &history[history.len().saturating_sub(window)..]
}
