//! Chaos provider: a misbehaving opponent for exercising the action gate.
//!
//! With probability `failure_rate` each call misbehaves in one of several
//! ways (garbage text, an error, an out-of-range bid, a challenge with no
//! bid on the table, or hanging past any sensible budget). Otherwise it
//! answers in text with the minimum raise, or challenges when none exists.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::prelude::*;
use tracing::trace;

use super::config::AiConfig;
use super::trait_def::{AiError, Candidate, DecisionProvider, Rejection};
use crate::domain::action::Action;
use crate::domain::player_view::PlayerView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Misbehavior {
    Garbage,
    Error,
    OutOfRange,
    BareChallenge,
    Hang,
}

const MISBEHAVIORS: [Misbehavior; 5] = [
    Misbehavior::Garbage,
    Misbehavior::Error,
    Misbehavior::OutOfRange,
    Misbehavior::BareChallenge,
    Misbehavior::Hang,
];

pub struct Chaos {
    rng: Mutex<StdRng>,
    failure_rate: f64,
    hang: Duration,
}

impl Chaos {
    pub const NAME: &'static str = "Chaos";
    pub const VERSION: &'static str = "1.0.0";

    pub const DEFAULT_FAILURE_RATE: f64 = 0.5;
    pub const DEFAULT_HANG_MS: u64 = 10_000;

    pub fn new(seed: Option<u64>, failure_rate: f64, hang: Duration) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            failure_rate: failure_rate.clamp(0.0, 1.0),
            hang,
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(
            config.seed(),
            config.custom_f64("failure_rate", Self::DEFAULT_FAILURE_RATE),
            Duration::from_millis(config.custom_u64("hang_ms", Self::DEFAULT_HANG_MS)),
        )
    }

    /// Draw this call's behavior; `None` means answer properly.
    fn roll(&self, view: &PlayerView) -> Option<Misbehavior> {
        let mut rng = self.rng.lock();
        if !rng.random_bool(self.failure_rate) {
            return None;
        }
        // A bare challenge is only a misbehavior while no bid is on the table.
        let pool: Vec<Misbehavior> = MISBEHAVIORS
            .into_iter()
            .filter(|m| *m != Misbehavior::BareChallenge || !view.can_challenge())
            .collect();
        pool.choose(&mut *rng).copied()
    }

    fn honest(view: &PlayerView) -> Candidate {
        match view.minimum_raise() {
            Some(bid) => Candidate::text(Action::from(bid).to_string()),
            None => Candidate::text("CHALLENGE"),
        }
    }
}

#[async_trait]
impl DecisionProvider for Chaos {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn propose(
        &self,
        view: &PlayerView,
        _previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        let behavior = self.roll(view);
        trace!(player = view.player, ?behavior, "chaos provider rolled");
        match behavior {
            None => Ok(Self::honest(view)),
            Some(Misbehavior::Garbage) => Ok(Candidate::text("I raise you three goats")),
            Some(Misbehavior::Error) => Err(AiError::Internal("chaos: simulated crash".into())),
            Some(Misbehavior::OutOfRange) => Ok(Action::bid(view.total_dice + 1, 9).into()),
            Some(Misbehavior::BareChallenge) => Ok(Candidate::text("challenge")),
            Some(Misbehavior::Hang) => {
                tokio::time::sleep(self.hang).await;
                Ok(Self::honest(view))
            }
        }
    }
}
