//! Action gate: obtains one legal action per turn from an untrusted provider.
//!
//! Each attempt runs the provider on its own thread and runtime while the
//! caller waits under a hard time budget, so a provider that blocks cannot
//! hold the turn. On timeout the thread is abandoned and nothing it produces
//! later is used. Output is interpreted (structured candidate or the
//! `CHALLENGE` / `BID <q> <f>` grammar), checked against the player's view,
//! and on rejection the provider is asked again with the reason attached.
//! When every attempt is spent the gate substitutes the deterministic
//! fallback: challenge if a bid exists, otherwise `BID 1 1`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime;
use tokio::sync::oneshot;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};

use crate::ai::{AiError, Candidate, DecisionProvider, RejectReason, Rejection};
use crate::domain::action::Action;
use crate::domain::player_view::PlayerView;

pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(5_000);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Provider calls allowed per turn before the fallback applies.
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Provider,
    Fallback,
}

/// The gate's verdict for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Always legal for the view it was decided on.
    pub action: Action,
    pub source: DecisionSource,
    /// Provider calls made.
    pub attempts: u32,
    pub rejections: Vec<Rejection>,
    pub elapsed: Duration,
}

impl Decision {
    pub fn is_fallback(&self) -> bool {
        self.source == DecisionSource::Fallback
    }
}

/// Time budget plus retry policy, shared by every turn of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionGate {
    time_budget: Duration,
    retry: RetryPolicy,
}

impl ActionGate {
    pub fn new(time_budget: Duration, retry: RetryPolicy) -> Self {
        Self { time_budget, retry }
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub async fn decide(&self, view: &PlayerView, provider: &Arc<dyn DecisionProvider>) -> Decision {
        decide(view, provider, self.time_budget, self.retry).await
    }
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_BUDGET, RetryPolicy::default())
    }
}

/// Obtain a legal action for `view` from `provider`.
///
/// Makes at most `retry.max_attempts` calls, each bounded by `time_budget`,
/// so it returns within `max_attempts * time_budget` plus scheduling slack.
pub async fn decide(
    view: &PlayerView,
    provider: &Arc<dyn DecisionProvider>,
    time_budget: Duration,
    retry: RetryPolicy,
) -> Decision {
    let started = Instant::now();
    let mut rejections: Vec<Rejection> = Vec::new();

    for attempt in 1..=retry.max_attempts {
        debug!(
            player = view.player,
            provider = provider.name(),
            attempt,
            "requesting decision"
        );

        let outcome = call_provider(provider, view, rejections.last().cloned(), time_budget)
            .await
            .and_then(|candidate| interpret(view, candidate));

        match outcome {
            Ok(action) => {
                return Decision {
                    action,
                    source: DecisionSource::Provider,
                    attempts: attempt,
                    rejections,
                    elapsed: started.elapsed(),
                };
            }
            Err(reason) => {
                warn!(
                    player = view.player,
                    provider = provider.name(),
                    attempt,
                    %reason,
                    "decision rejected"
                );
                rejections.push(Rejection { attempt, reason });
            }
        }
    }

    let action = view.fallback_action();
    info!(
        player = view.player,
        provider = provider.name(),
        attempts = retry.max_attempts,
        %action,
        "applying fallback action"
    );
    Decision {
        action,
        source: DecisionSource::Fallback,
        attempts: retry.max_attempts,
        rejections,
        elapsed: started.elapsed(),
    }
}

/// One provider call on a dedicated thread with its own current-thread runtime.
///
/// The caller only awaits a channel, so neither blocking work nor a stuck
/// future in the provider can delay the budget. A thread that overruns is
/// detached and whatever it sends afterwards is dropped.
async fn call_provider(
    provider: &Arc<dyn DecisionProvider>,
    view: &PlayerView,
    previous: Option<Rejection>,
    time_budget: Duration,
) -> Result<Candidate, RejectReason> {
    let provider = Arc::clone(provider);
    let view = view.clone();
    let (tx, rx) = oneshot::channel();

    let spawned = thread::Builder::new()
        .name(format!("provider-seat-{}", view.player))
        .spawn(move || {
            let answer = match runtime::Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt.block_on(provider.propose(&view, previous.as_ref())),
                Err(e) => Err(AiError::Internal(format!("provider runtime: {e}"))),
            };
            // The receiver is gone once the budget has run out.
            let _ = tx.send(answer);
        });
    if let Err(e) = spawned {
        return Err(RejectReason::ProviderFailure(format!(
            "could not start provider thread: {e}"
        )));
    }

    match timeout(time_budget, rx).await {
        Err(_) => Err(RejectReason::Timeout),
        Ok(Err(_)) => Err(RejectReason::ProviderFailure(
            "provider thread died before answering".into(),
        )),
        Ok(Ok(Err(AiError::Timeout))) => Err(RejectReason::Timeout),
        Ok(Ok(Err(e))) => Err(RejectReason::ProviderFailure(e.to_string())),
        Ok(Ok(Ok(candidate))) => Ok(candidate),
    }
}

/// Turn a candidate into an action that is legal for `view`.
fn interpret(view: &PlayerView, candidate: Candidate) -> Result<Action, RejectReason> {
    let action = match candidate {
        Candidate::Structured(action) => action,
        Candidate::Text(text) => text
            .parse::<Action>()
            .map_err(|e| RejectReason::Parse(e.to_string()))?,
    };
    view.check(&action)
        .map_err(|e| RejectReason::Illegal(e.to_string()))?;
    Ok(action)
}
