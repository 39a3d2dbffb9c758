//! Player view of game state - what information is visible to a player.
//!
//! [`PlayerView`] is the only thing a decision provider ever receives. It is an
//! immutable snapshot: the player's own dice, every player's dice count, the
//! bid on the table and a bounded window of public history. Other players'
//! dice are never part of it.

use serde::{Deserialize, Serialize};

use crate::domain::action::Action;
use crate::domain::bidding::{check_successor, legal_successors, minimum_bid, minimum_raise, Bid};
use crate::domain::dice::Hand;
use crate::domain::history::HistoryEvent;
use crate::domain::state::PlayerId;
use crate::errors::domain::{DomainError, IllegalActionKind};

/// Information visible to a player at a decision point.
///
/// ## Helper Methods
///
/// Providers should lean on these instead of re-implementing the rules:
///
/// - [`legal_bids()`](Self::legal_bids) - every bid that may follow the current one
/// - [`can_challenge()`](Self::can_challenge) - whether a challenge is available
/// - [`check()`](Self::check) - whether a candidate action would be accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Seat this view belongs to.
    pub player: PlayerId,
    pub round_no: u32,
    /// This player's own dice.
    pub hand: Hand,
    /// Dice count per seat; zero means eliminated.
    pub dice_counts: Vec<u32>,
    pub current_bid: Option<Bid>,
    pub total_dice: u32,
    /// Seat whose turn it is.
    pub turn: PlayerId,
    pub wild_ones: bool,
    /// Most recent public events, oldest first.
    pub recent_history: Vec<HistoryEvent>,
}

impl PlayerView {
    pub fn active_players(&self) -> usize {
        self.dice_counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn can_challenge(&self) -> bool {
        self.current_bid.is_some()
    }

    /// Dice on the table this player cannot see.
    pub fn unseen_dice(&self) -> u32 {
        self.total_dice.saturating_sub(self.hand.len() as u32)
    }

    pub fn legal_bids(&self) -> Vec<Bid> {
        legal_successors(self.current_bid.as_ref(), self.player, self.total_dice)
    }

    pub fn minimum_raise(&self) -> Option<Bid> {
        minimum_raise(self.current_bid.as_ref(), self.player, self.total_dice)
    }

    /// Validate `action` against this view's table.
    ///
    /// A challenge needs a bid to challenge; a bid must be a legal successor.
    pub fn check(&self, action: &Action) -> Result<(), DomainError> {
        match action.as_bid(self.player) {
            None if self.can_challenge() => Ok(()),
            None => Err(DomainError::illegal(
                IllegalActionKind::NoCurrentBid,
                "cannot challenge before any bid",
            )),
            Some(bid) => check_successor(
                self.current_bid.as_ref(),
                &bid,
                self.total_dice,
                self.active_players(),
            ),
        }
    }

    /// The deterministic safe action: challenge if a bid exists, else `BID 1 1`.
    ///
    /// Always legal while at least two players have dice.
    pub fn fallback_action(&self) -> Action {
        if self.can_challenge() {
            Action::Challenge
        } else {
            minimum_bid(self.player).into()
        }
    }
}
