//! Per-game records written by the simulator.

use dice_engine::{GameOutcome, HistoryEvent};
use serde::Serialize;

/// Complete game record for JSONL output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub providers: Vec<String>,
    pub winner: Option<usize>,
    pub rounds: u32,
    pub turns: u64,
    pub fallbacks: Vec<u32>,
    pub challenges: ChallengeStats,
    pub duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEvent>>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ChallengeStats {
    /// Challenges where the bid held and the challenger paid.
    pub bid_stood: u32,
    /// Challenges that caught an overbid.
    pub bid_failed: u32,
}

/// One CSV summary row per game.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: Option<usize>,
    pub winner_provider: Option<String>,
    pub rounds: u32,
    pub turns: u64,
    pub total_fallbacks: u32,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        Self {
            game_id: m.game_id,
            seed: m.seed,
            winner: m.winner,
            winner_provider: m.winner.and_then(|w| m.providers.get(w).cloned()),
            rounds: m.rounds,
            turns: m.turns,
            total_fallbacks: m.fallbacks.iter().sum(),
        }
    }
}

pub fn challenge_stats(history: &[HistoryEvent]) -> ChallengeStats {
    history
        .iter()
        .fold(ChallengeStats::default(), |mut stats, event| {
            if let HistoryEvent::ChallengeResolved { bid_stands, .. } = event {
                if *bid_stands {
                    stats.bid_stood += 1;
                } else {
                    stats.bid_failed += 1;
                }
            }
            stats
        })
}

/// Build the record for one finished game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    providers: &[String],
    outcome: GameOutcome,
    duration_ms: f64,
    keep_history: bool,
) -> GameMetrics {
    GameMetrics {
        game_id,
        seed,
        providers: providers.to_vec(),
        winner: outcome.winner,
        rounds: outcome.rounds_played,
        turns: outcome.turns,
        challenges: challenge_stats(&outcome.history),
        fallbacks: outcome.fallbacks,
        duration_ms,
        history: keep_history.then_some(outcome.history),
    }
}
