//! Hidden dice: rolling hands and counting the dice still in play.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::rules::{face_range, WILD_FACE};

/// A face value, 1..=6.
pub type Face = u8;

/// One player's hidden dice for the current round.
pub type Hand = Vec<Face>;

/// Roll `dice_count` independent, uniform dice.
pub fn roll_hand<R: Rng + ?Sized>(rng: &mut R, dice_count: u32) -> Hand {
    (0..dice_count).map(|_| rng.random_range(face_range())).collect()
}

/// Roll a hand for every seat, deterministically for a given seed.
///
/// Seats with a zero count get an empty hand. Hands are sorted for display;
/// order carries no meaning.
pub fn roll_hands(dice_counts: &[u32], seed: u64) -> Vec<Hand> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    dice_counts
        .iter()
        .map(|&count| {
            let mut hand = roll_hand(&mut rng, count);
            hand.sort_unstable();
            hand
        })
        .collect()
}

/// Sum of dice over all players. Eliminated players contribute zero.
pub fn total_dice_in_play(dice_counts: &[u32]) -> u32 {
    dice_counts.iter().sum()
}

/// Count dice showing `face` in one hand, with ones counted as wild if enabled.
pub fn count_matching(hand: &[Face], face: Face, wild_ones: bool) -> u32 {
    hand.iter()
        .filter(|&&die| die == face || (wild_ones && face != WILD_FACE && die == WILD_FACE))
        .count() as u32
}
