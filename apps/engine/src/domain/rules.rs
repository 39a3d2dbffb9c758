use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 2;
pub const DEFAULT_STARTING_DICE: u32 = 5;
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;

/// Face value that counts toward any other face when wild ones are enabled.
pub const WILD_FACE: u8 = 1;

pub fn face_range() -> RangeInclusive<u8> {
    MIN_FACE..=MAX_FACE
}

/// Valid bid quantities for a table with `total_dice` dice in play.
pub fn quantity_range(total_dice: u32) -> RangeInclusive<u32> {
    1..=total_dice
}
