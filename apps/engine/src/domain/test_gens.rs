// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::bidding::Bid;
use crate::domain::dice::{Face, Hand};
use crate::domain::rules::{MAX_FACE, MIN_FACE};
use crate::domain::state::PlayerId;

/// Generate a face value 1..=6
pub fn face() -> impl Strategy<Value = Face> {
    MIN_FACE..=MAX_FACE
}

/// Generate a possibly out-of-range face value
pub fn any_face() -> impl Strategy<Value = Face> {
    any::<u8>()
}

/// Generate a hand of `min..=max` dice
pub fn hand(min: usize, max: usize) -> impl Strategy<Value = Hand> {
    prop::collection::vec(face(), min..=max)
}

/// Generate 2..=6 hands, each with 1..=5 dice
pub fn table_hands() -> impl Strategy<Value = Vec<Hand>> {
    prop::collection::vec(hand(1, 5), 2..=6)
}

/// Generate a bid by `player` that is in range for `total_dice`
pub fn bid_within(player: PlayerId, total_dice: u32) -> impl Strategy<Value = Bid> {
    (1..=total_dice.max(1), face()).prop_map(move |(quantity, face)| Bid::new(player, quantity, face))
}
