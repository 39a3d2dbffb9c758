//! Test-only table helpers for domain unit tests.

use crate::domain::bidding::Bid;
use crate::domain::dice::Hand;
use crate::domain::player_view::PlayerView;
use crate::domain::rules::{DEFAULT_HISTORY_WINDOW, DEFAULT_STARTING_DICE};
use crate::domain::state::{PlayerId, RoundState, TableSetup};

/// A table setup with defaults, player 0 opening.
pub fn setup(num_players: usize) -> TableSetup {
    TableSetup {
        num_players,
        starting_dice: DEFAULT_STARTING_DICE,
        wild_ones: false,
        history_window: DEFAULT_HISTORY_WINDOW,
        opening_player: Some(0),
        seed: 42,
    }
}

/// Round 1 with the given hands and opener.
pub fn table(hands: Vec<Hand>, opener: PlayerId) -> RoundState {
    RoundState::with_hands(&setup(hands.len()), hands, opener)
        .expect("test hands must form a valid table")
}

/// Same as [`table`] with wild ones enabled.
pub fn wild_table(hands: Vec<Hand>, opener: PlayerId) -> RoundState {
    let mut setup = setup(hands.len());
    setup.wild_ones = true;
    RoundState::with_hands(&setup, hands, opener).expect("test hands must form a valid table")
}

/// A view for `player` on their own turn, built directly from hands.
pub fn view_for(hands: Vec<Hand>, player: PlayerId, current_bid: Option<Bid>) -> PlayerView {
    let dice_counts: Vec<u32> = hands.iter().map(|h| h.len() as u32).collect();
    PlayerView {
        player,
        round_no: 1,
        hand: hands[player].clone(),
        total_dice: dice_counts.iter().sum(),
        dice_counts,
        current_bid,
        turn: player,
        wild_ones: false,
        recent_history: Vec::new(),
    }
}
