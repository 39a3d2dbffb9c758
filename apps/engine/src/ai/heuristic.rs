//! Heuristic: a deterministic expected-count baseline.
//!
//! For each face it estimates how many matching dice are on the table:
//! the player's own matches plus the unseen dice times the chance a single
//! die matches (1/6, or 1/3 for non-one faces when ones are wild).
//!
//! - Challenge when the current bid exceeds the estimate for its face by
//!   more than `margin`.
//! - Otherwise make the cheapest raise whose quantity stays within the
//!   estimate, preferring the face with the most slack.
//! - If no raise is believable, challenge (or open with the minimum bid).
//!
//! No randomness is used; the same view always yields the same action.

use async_trait::async_trait;

use super::config::AiConfig;
use super::trait_def::{AiError, Candidate, DecisionProvider, Rejection};
use crate::domain::action::Action;
use crate::domain::bidding::{minimum_bid, Bid};
use crate::domain::dice::{count_matching, Face};
use crate::domain::player_view::PlayerView;
use crate::domain::rules::{face_range, MAX_FACE, WILD_FACE};

#[derive(Clone)]
pub struct Heuristic {
    margin: f64,
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub const DEFAULT_MARGIN: f64 = 0.5;

    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.custom_f64("margin", Self::DEFAULT_MARGIN))
    }

    /// Expected number of dice showing `face` across the table.
    pub fn expected_count(view: &PlayerView, face: Face) -> f64 {
        let own = count_matching(&view.hand, face, view.wild_ones) as f64;
        let p = if view.wild_ones && face != WILD_FACE {
            2.0 / 6.0
        } else {
            1.0 / 6.0
        };
        own + view.unseen_dice() as f64 * p
    }

    /// Smallest quantity at which a bid on `face` outranks `current`.
    fn cheapest_quantity(current: Option<&Bid>, face: Face) -> u32 {
        match current {
            None => 1,
            Some(bid) if face > bid.face => bid.quantity,
            Some(bid) => bid.quantity + 1,
        }
    }

    pub fn decide(&self, view: &PlayerView) -> Action {
        let current = view.current_bid.as_ref();

        if let Some(bid) = current {
            if bid.quantity as f64 > Self::expected_count(view, bid.face) + self.margin {
                return Action::Challenge;
            }
        }

        let best = face_range()
            .filter_map(|face| {
                let quantity = Self::cheapest_quantity(current, face);
                let slack = Self::expected_count(view, face) - quantity as f64;
                (quantity <= view.total_dice && slack >= -self.margin)
                    .then_some((slack, face, quantity))
            })
            .max_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        match (best, current) {
            (Some((_, face, quantity)), _) => Action::bid(quantity, face),
            (None, Some(_)) => Action::Challenge,
            (None, None) => minimum_bid(view.player).into(),
        }
    }
}

impl Default for Heuristic {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARGIN)
    }
}

#[async_trait]
impl DecisionProvider for Heuristic {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn propose(
        &self,
        view: &PlayerView,
        _previous: Option<&Rejection>,
    ) -> Result<Candidate, AiError> {
        let action = self.decide(view);
        if view.check(&action).is_err() {
            return Err(AiError::InvalidMove(format!(
                "{action} is not legal (faces 1..={MAX_FACE}, {} dice)",
                view.total_dice
            )));
        }
        Ok(action.into())
    }
}
