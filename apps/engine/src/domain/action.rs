use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::bidding::Bid;
use crate::domain::dice::Face;
use crate::domain::state::PlayerId;

/// A decided move for the player whose turn it is.
///
/// The action carries no table state; whether it is legal depends on the
/// bid currently on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Bid { quantity: u32, face: Face },
    Challenge,
}

impl Action {
    pub fn bid(quantity: u32, face: Face) -> Self {
        Action::Bid { quantity, face }
    }

    /// Attach the acting player to a bid action.
    pub fn as_bid(&self, player: PlayerId) -> Option<Bid> {
        match *self {
            Action::Bid { quantity, face } => Some(Bid::new(player, quantity, face)),
            Action::Challenge => None,
        }
    }

    pub fn is_challenge(&self) -> bool {
        matches!(self, Action::Challenge)
    }
}

impl From<Bid> for Action {
    fn from(bid: Bid) -> Self {
        Action::bid(bid.quantity, bid.face)
    }
}

/// Renders in the same grammar accepted by `Action::from_str`.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Bid { quantity, face } => write!(f, "BID {quantity} {face}"),
            Action::Challenge => write!(f, "CHALLENGE"),
        }
    }
}
