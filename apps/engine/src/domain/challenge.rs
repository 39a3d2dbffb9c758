//! Challenge resolution: reveal every hand and decide who loses a die.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Bid;
use crate::domain::dice::{count_matching, Hand};
use crate::domain::state::PlayerId;

/// Result of revealing the hands against the bid under challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    /// Dice across all hands matching the bid face (ones included when wild).
    pub actual_count: u32,
    /// True when `actual_count >= bid.quantity`.
    pub bid_stands: bool,
    /// Challenger if the bid stands, otherwise the bidder.
    pub loser: PlayerId,
}

/// Resolve a challenge by `challenger` against `bid`.
///
/// `hands` holds one hand per seat; eliminated seats hold empty hands and so
/// contribute nothing. Deterministic given the hands.
pub fn resolve(
    bid: &Bid,
    challenger: PlayerId,
    hands: &[Hand],
    wild_ones: bool,
) -> ChallengeOutcome {
    let actual_count = hands
        .iter()
        .map(|hand| count_matching(hand, bid.face, wild_ones))
        .sum::<u32>();
    let bid_stands = actual_count >= bid.quantity;
    let loser = if bid_stands { challenger } else { bid.player };
    ChallengeOutcome {
        actual_count,
        bid_stands,
        loser,
    }
}
