//! Bid legality: which bids may follow the bid currently on the table.
//!
//! Bids are ordered by quantity first and face second. A successor must raise
//! the quantity (any face), or keep the quantity and raise the face. Face
//! comparison is literal even when wild ones are enabled; wild ones only
//! change how a challenge is counted.

use serde::{Deserialize, Serialize};

use crate::domain::dice::Face;
use crate::domain::rules::{face_range, quantity_range, MAX_FACE, MIN_FACE, MIN_PLAYERS};
use crate::domain::state::PlayerId;
use crate::errors::domain::{DomainError, IllegalActionKind};

/// A public claim that at least `quantity` dice on the table show `face`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub player: PlayerId,
    pub quantity: u32,
    pub face: Face,
}

impl Bid {
    pub fn new(player: PlayerId, quantity: u32, face: Face) -> Self {
        Self {
            player,
            quantity,
            face,
        }
    }

    /// True if `self` ranks strictly above `other` in (quantity, face) order.
    pub fn outranks(&self, other: &Bid) -> bool {
        (self.quantity, self.face) > (other.quantity, other.face)
    }
}

/// Check that `proposed` is a valid successor to `current`.
///
/// Returns the reason as an `IllegalAction` error when it is not.
pub fn check_successor(
    current: Option<&Bid>,
    proposed: &Bid,
    total_dice: u32,
    active_players: usize,
) -> Result<(), DomainError> {
    if active_players < MIN_PLAYERS {
        return Err(DomainError::illegal(
            IllegalActionKind::PhaseMismatch,
            format!("bidding needs {MIN_PLAYERS} active players, found {active_players}"),
        ));
    }
    if !face_range().contains(&proposed.face) {
        return Err(DomainError::illegal(
            IllegalActionKind::FaceOutOfRange,
            format!(
                "face {} outside {MIN_FACE}..={MAX_FACE}",
                proposed.face
            ),
        ));
    }
    if !quantity_range(total_dice).contains(&proposed.quantity) {
        return Err(DomainError::illegal(
            IllegalActionKind::QuantityOutOfRange,
            format!(
                "quantity {} outside 1..={total_dice}",
                proposed.quantity
            ),
        ));
    }
    match current {
        Some(current) if !proposed.outranks(current) => Err(DomainError::illegal(
            IllegalActionKind::BidNotHigher,
            format!(
                "{}x{} does not exceed {}x{}",
                proposed.quantity, proposed.face, current.quantity, current.face
            ),
        )),
        _ => Ok(()),
    }
}

/// Pure predicate form of [`check_successor`].
pub fn is_legal_successor(
    current: Option<&Bid>,
    proposed: &Bid,
    total_dice: u32,
    active_players: usize,
) -> bool {
    check_successor(current, proposed, total_dice, active_players).is_ok()
}

/// The opening bid used when nothing better is available: one die showing one.
pub fn minimum_bid(player: PlayerId) -> Bid {
    Bid::new(player, 1, MIN_FACE)
}

/// The lowest-ranked legal successor to `current`, if any exists.
pub fn minimum_raise(current: Option<&Bid>, player: PlayerId, total_dice: u32) -> Option<Bid> {
    let candidate = match current {
        None => minimum_bid(player),
        Some(bid) if bid.face < MAX_FACE => Bid::new(player, bid.quantity, bid.face + 1),
        Some(bid) => Bid::new(player, bid.quantity + 1, MIN_FACE),
    };
    quantity_range(total_dice)
        .contains(&candidate.quantity)
        .then_some(candidate)
}

/// Every legal successor to `current`, lowest first.
pub fn legal_successors(current: Option<&Bid>, player: PlayerId, total_dice: u32) -> Vec<Bid> {
    quantity_range(total_dice)
        .flat_map(|quantity| face_range().map(move |face| Bid::new(player, quantity, face)))
        .filter(|bid| current.map_or(true, |c| bid.outranks(c)))
        .collect()
}
