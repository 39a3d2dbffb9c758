//! Random provider - makes random legal moves.
//!
//! [`RandomPlayer`] is the reference implementation of
//! [`DecisionProvider`](super::DecisionProvider): it only ever proposes
//! actions drawn from the view's legal-move helpers, so the gate never has to
//! reject it.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::prelude::*;

use super::config::AiConfig;
use super::trait_def::{AiError, Candidate, DecisionProvider, Rejection};
use crate::domain::action::Action;
use crate::domain::player_view::PlayerView;

/// Provider that makes random legal moves.
///
/// With a bid on the table it challenges with probability `challenge_rate`;
/// otherwise it bids uniformly among the `raise_window` lowest legal raises.
///
/// ```rust,ignore
/// let seeded = RandomPlayer::new(Some(42));
/// let entropy = RandomPlayer::new(None);
/// ```
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
    challenge_rate: f64,
    raise_window: usize,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";
    pub const VERSION: &'static str = "1.0.0";

    pub const DEFAULT_CHALLENGE_RATE: f64 = 0.3;
    pub const DEFAULT_RAISE_WINDOW: usize = 8;

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            challenge_rate: Self::DEFAULT_CHALLENGE_RATE,
            raise_window: Self::DEFAULT_RAISE_WINDOW,
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        let mut player = Self::new(config.seed());
        player.challenge_rate = config
            .custom_f64("challenge_rate", Self::DEFAULT_CHALLENGE_RATE)
            .clamp(0.0, 1.0);
        player.raise_window = config
            .custom_u64("raise_window", Self::DEFAULT_RAISE_WINDOW as u64)
            .max(1) as usize;
        player
    }

    fn choose(&self, view: &PlayerView) -> Result<Action, AiError> {
        let mut rng = self.rng.lock();

        if view.can_challenge() && rng.random_bool(self.challenge_rate) {
            return Ok(Action::Challenge);
        }

        let legal_bids = view.legal_bids();
        let window = &legal_bids[..legal_bids.len().min(self.raise_window)];
        match window.choose(&mut *rng) {
            Some(bid) => Ok(Action::from(*bid)),
            None if view.can_challenge() => Ok(Action::Challenge),
            None => Err(AiError::InvalidMove("no legal bids available".into())),
        }
    }
}

#[async_trait]
impl DecisionProvider for RandomPlayer {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn propose(
        &self,
        view: &PlayerView,
        _previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        self.choose(view).map(Candidate::from)
    }
}
