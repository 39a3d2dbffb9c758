//! Property tests for the round state machine under random legal play.

use proptest::prelude::*;

use crate::domain::action::Action;
use crate::domain::state::{Phase, RoundState, TableSetup};
use crate::domain::test_prelude;

fn random_setup(num_players: usize, starting_dice: u32, seed: u64, wild_ones: bool) -> TableSetup {
    TableSetup {
        num_players,
        starting_dice,
        wild_ones,
        history_window: 5,
        opening_player: None,
        seed,
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: playing random legal actions to the end preserves every
    /// table invariant and always terminates with a single survivor.
    #[test]
    fn prop_random_games_keep_invariants(
        num_players in 2usize..=5,
        starting_dice in 1u32..=4,
        seed in any::<u64>(),
        wild_ones in any::<bool>(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 64),
    ) {
        let mut state = RoundState::new(&random_setup(num_players, starting_dice, seed, wild_ones)).unwrap();
        let mut step = 0usize;

        while !state.is_game_over() {
            prop_assert!(step < 10_000, "game did not terminate");
            let turn = state.turn();
            prop_assert!(state.dice_count(turn).unwrap_or(0) > 0, "turn points at an eliminated seat");

            let view = state.project_for(turn).unwrap();
            let mut options: Vec<Action> = view.legal_bids().into_iter().map(Action::from).collect();
            if view.can_challenge() {
                options.push(Action::Challenge);
            }
            prop_assert!(!options.is_empty());
            let action = *picks[step % picks.len()].get(&options);
            step += 1;

            match action.as_bid(turn) {
                Some(bid) => state.apply_bid(turn, bid).unwrap(),
                None => {
                    let before = state.dice_counts();
                    let report = state.apply_challenge(turn).unwrap();
                    let after = state.dice_counts();

                    let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
                    prop_assert_eq!(changed, vec![report.outcome.loser]);
                    prop_assert_eq!(after[report.outcome.loser] + 1, before[report.outcome.loser]);
                    prop_assert_eq!(after.iter().sum::<u32>() + 1, before.iter().sum::<u32>());

                    state.start_new_round().unwrap();
                    let sizes = state.hand_sizes();
                    for (seat, count) in state.dice_counts().into_iter().enumerate() {
                        prop_assert_eq!(sizes[seat], count as usize);
                    }
                }
            }
        }

        prop_assert_eq!(state.phase(), Phase::GameOver);
        let winner = state.winner().unwrap();
        prop_assert_eq!(state.active_players(), 1);
        prop_assert!(state.dice_count(winner).unwrap() > 0);
    }
}
