//! Game orchestration: drives one session from the first roll to a winner.
//!
//! [`GameSession`] owns the [`RoundState`] and one provider per seat. Each
//! turn it projects the acting player's view, asks the action gate for a
//! decision, applies it, notifies observers, and rolls the next round after
//! a challenge. Provider misbehavior is absorbed by the gate; an illegal
//! action reaching the state machine here is an engine defect.

mod observer;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use observer::{
    GameObserver, Recording, RecordingObserver, RoundEvent, TracingObserver, TurnEvent,
};

use crate::ai::DecisionProvider;
use crate::config::SessionConfig;
use crate::domain::action::Action;
use crate::domain::history::HistoryEvent;
use crate::domain::state::{ChallengeReport, Phase, PlayerId, RoundState};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::action_gate::ActionGate;

/// Final result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Option<PlayerId>,
    pub rounds_played: u32,
    pub turns: u64,
    /// Fallback actions applied, per seat.
    pub fallbacks: Vec<u32>,
    pub history: Vec<HistoryEvent>,
}

pub struct GameSession {
    state: RoundState,
    providers: Vec<Arc<dyn DecisionProvider>>,
    gate: ActionGate,
    observers: Vec<Box<dyn GameObserver>>,
    turns: u64,
    fallbacks: Vec<u32>,
}

impl GameSession {
    /// Seat one provider per player and roll round 1.
    pub fn new(
        config: &SessionConfig,
        providers: Vec<Arc<dyn DecisionProvider>>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let state = RoundState::new(&config.table_setup())?;
        Self::from_state(state, providers, config.gate_policy())
    }

    /// Resume from an existing table, e.g. one built from known hands.
    pub fn from_state(
        state: RoundState,
        providers: Vec<Arc<dyn DecisionProvider>>,
        gate: ActionGate,
    ) -> Result<Self, AppError> {
        if providers.len() != state.num_players() {
            return Err(AppError::config(format!(
                "{} providers for a {}-player table",
                providers.len(),
                state.num_players()
            )));
        }
        let fallbacks = vec![0; state.num_players()];
        Ok(Self {
            state,
            providers,
            gate,
            observers: Vec::new(),
            turns: 0,
            fallbacks,
        })
    }

    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Play one turn. Returns `None` once the game is over.
    pub async fn play_turn(&mut self) -> Result<Option<TurnEvent>, AppError> {
        match self.state.phase() {
            Phase::GameOver => return Ok(None),
            Phase::RoundOver => {
                self.next_round()?;
                if self.is_over() {
                    return Ok(None);
                }
            }
            Phase::AwaitingAction => {}
        }

        let player = self.state.turn();
        let view = self.state.project_for(player).map_err(defect)?;
        let provider = self
            .providers
            .get(player)
            .ok_or_else(|| AppError::internal(format!("no provider seated at {player}")))?;
        let decision = self.gate.decide(&view, provider).await;

        if decision.is_fallback() {
            self.fallbacks[player] += 1;
        }

        let report = self.apply(player, &decision.action)?;
        self.turns += 1;
        debug!(
            player,
            action = %decision.action,
            attempts = decision.attempts,
            fallback = decision.is_fallback(),
            "Action applied"
        );

        let event = TurnEvent {
            player,
            action: decision.action,
            source: decision.source,
            attempts: decision.attempts,
            elapsed: decision.elapsed,
            summary: self.state.summary(),
        };
        for observer in &self.observers {
            observer.on_turn(&event);
        }

        if let Some(report) = report {
            let round = RoundEvent::from(&report);
            for observer in &self.observers {
                observer.on_round_resolved(&round);
            }
            self.next_round()?;
        }

        Ok(Some(event))
    }

    /// Play until one player is left.
    pub async fn run(&mut self) -> Result<GameOutcome, AppError> {
        while self.play_turn().await?.is_some() {}
        Ok(self.outcome())
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            winner: self.state.winner(),
            rounds_played: self.state.round_no(),
            turns: self.turns,
            fallbacks: self.fallbacks.clone(),
            history: self.state.history().to_vec(),
        }
    }

    fn apply(
        &mut self,
        player: PlayerId,
        action: &Action,
    ) -> Result<Option<ChallengeReport>, AppError> {
        match action.as_bid(player) {
            Some(bid) => {
                self.state.apply_bid(player, bid).map_err(defect)?;
                Ok(None)
            }
            None => self.state.apply_challenge(player).map(Some).map_err(defect),
        }
    }

    fn next_round(&mut self) -> Result<(), AppError> {
        self.state.start_new_round().map_err(defect)?;
        if self.is_over() {
            let summary = self.state.summary();
            let winner = self.state.winner();
            info!(
                ?winner,
                rounds = summary.round_no,
                turns = self.turns,
                fallbacks = ?self.fallbacks,
                "Session finished"
            );
            for observer in &self.observers {
                observer.on_game_over(winner, &summary);
            }
        }
        Ok(())
    }
}

/// The gate only forwards legal actions, so a rejection here is a bug.
fn defect(err: DomainError) -> AppError {
    AppError::internal(format!("engine defect: {err}"))
}
