//! RNG seed derivation utilities for deterministic game behavior.
//!
//! Provides functions to derive unique-but-deterministic seeds for different
//! game contexts (dice rolls, opening player) from a base game seed.

/// Derive a seed for rolling every hand at the start of a round.
///
/// Same game + round = same dice, which makes a seeded session replayable.
///
/// # Arguments
///
/// * `game_seed` - Base RNG seed of the session
/// * `round_no` - Round number (1-based)
pub fn derive_roll_seed(game_seed: u64, round_no: u32) -> u64 {
    game_seed
        .wrapping_add((round_no as u64).wrapping_mul(1_000_000))
        .wrapping_add(2) // Offset to distinguish from opening seed
}

/// Derive a seed for picking the opening player of the first round.
pub fn derive_opening_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_mul(31).wrapping_add(1)
}
