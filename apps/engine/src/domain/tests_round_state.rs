use crate::domain::bidding::Bid;
use crate::domain::history::HistoryEvent;
use crate::domain::state::{next_active, Phase, RoundState};
use crate::domain::test_state_helpers::{setup, table, wild_table};
use crate::errors::domain::{DomainError, IllegalActionKind};

fn assert_illegal(result: Result<impl std::fmt::Debug, DomainError>, kind: IllegalActionKind) {
    match result {
        Err(DomainError::IllegalAction(k, _)) => assert_eq!(k, kind),
        other => panic!("expected IllegalAction({kind:?}), got {other:?}"),
    }
}

#[test]
fn new_table_rolls_round_one() {
    let state = RoundState::new(&setup(4)).unwrap();
    assert_eq!(state.phase(), Phase::AwaitingAction);
    assert_eq!(state.round_no(), 1);
    assert_eq!(state.turn(), 0);
    assert_eq!(state.dice_counts(), vec![5, 5, 5, 5]);
    assert_eq!(state.hand_sizes(), vec![5, 5, 5, 5]);
    assert_eq!(state.total_dice(), 20);
    assert!(state.current_bid().is_none());
    assert!(matches!(
        state.history(),
        [HistoryEvent::RoundStarted { round_no: 1, opener: 0, .. }]
    ));
}

#[test]
fn seeded_tables_are_reproducible() {
    let mut s = setup(3);
    s.opening_player = None;
    let a = RoundState::new(&s).unwrap();
    let b = RoundState::new(&s).unwrap();
    assert_eq!(a.turn(), b.turn());
    for seat in 0..3 {
        assert_eq!(
            a.project_for(seat).unwrap().hand,
            b.project_for(seat).unwrap().hand
        );
    }
}

#[test]
fn invalid_setups_are_rejected() {
    assert!(RoundState::new(&setup(1)).is_err());

    let mut s = setup(2);
    s.starting_dice = 0;
    assert!(RoundState::new(&s).is_err());

    let mut s = setup(2);
    s.opening_player = Some(2);
    assert!(RoundState::new(&s).is_err());

    assert!(RoundState::with_hands(&setup(2), vec![vec![1], vec![]], 0).is_err());
    assert!(RoundState::with_hands(&setup(2), vec![vec![1], vec![7]], 0).is_err());
    assert!(RoundState::with_hands(&setup(3), vec![vec![1], vec![2], vec![]], 2).is_err());
}

#[test]
fn bid_advances_turn_and_records_history() {
    let mut state = table(vec![vec![2, 3], vec![4, 4], vec![6]], 0);
    state.apply_bid(0, Bid::new(0, 2, 4)).unwrap();

    assert_eq!(state.current_bid(), Some(&Bid::new(0, 2, 4)));
    assert_eq!(state.turn(), 1);
    assert_eq!(state.phase(), Phase::AwaitingAction);
    assert!(matches!(
        state.history().last(),
        Some(HistoryEvent::BidPlaced { bid, .. }) if *bid == Bid::new(0, 2, 4)
    ));
}

#[test]
fn turn_wraps_around_the_table() {
    let mut state = table(vec![vec![1], vec![2], vec![3]], 2);
    state.apply_bid(2, Bid::new(2, 1, 2)).unwrap();
    assert_eq!(state.turn(), 0);
}

#[test]
fn out_of_turn_bid_is_rejected() {
    let mut state = table(vec![vec![1], vec![2]], 0);
    assert_illegal(
        state.apply_bid(1, Bid::new(1, 1, 3)),
        IllegalActionKind::OutOfTurn,
    );
    assert_illegal(
        state.apply_bid(0, Bid::new(1, 1, 3)),
        IllegalActionKind::OutOfTurn,
    );
    assert_illegal(
        state.apply_bid(5, Bid::new(5, 1, 3)),
        IllegalActionKind::UnknownPlayer,
    );
}

#[test]
fn non_raising_bid_is_rejected_without_side_effects() {
    let mut state = table(vec![vec![1, 2], vec![3, 4]], 0);
    state.apply_bid(0, Bid::new(0, 2, 3)).unwrap();
    let history_len = state.history().len();

    assert_illegal(
        state.apply_bid(1, Bid::new(1, 2, 3)),
        IllegalActionKind::BidNotHigher,
    );
    assert_illegal(
        state.apply_bid(1, Bid::new(1, 2, 2)),
        IllegalActionKind::BidNotHigher,
    );
    assert_illegal(
        state.apply_bid(1, Bid::new(1, 5, 2)),
        IllegalActionKind::QuantityOutOfRange,
    );
    assert_eq!(state.current_bid(), Some(&Bid::new(0, 2, 3)));
    assert_eq!(state.turn(), 1);
    assert_eq!(state.history().len(), history_len);
}

#[test]
fn challenge_without_bid_is_illegal() {
    let mut state = table(vec![vec![1], vec![2]], 0);
    assert_illegal(state.apply_challenge(0), IllegalActionKind::NoCurrentBid);
    assert_eq!(state.phase(), Phase::AwaitingAction);
}

#[test]
fn challenge_removes_exactly_one_die() {
    let mut state = table(vec![vec![4, 4, 2], vec![1, 1, 1]], 0);
    state.apply_bid(0, Bid::new(0, 3, 4)).unwrap();
    let before = state.total_dice();

    let report = state.apply_challenge(1).unwrap();

    assert_eq!(report.outcome.actual_count, 2);
    assert!(!report.outcome.bid_stands);
    assert_eq!(report.outcome.loser, 0);
    assert!(!report.eliminated);
    assert_eq!(state.dice_counts(), vec![2, 3]);
    assert_eq!(state.total_dice(), before - 1);
    assert_eq!(state.phase(), Phase::RoundOver);
    assert_eq!(report.revealed, vec![vec![4, 4, 2], vec![1, 1, 1]]);
}

#[test]
fn wild_ones_change_the_outcome() {
    let mut state = wild_table(vec![vec![4, 4, 2], vec![1, 1, 1]], 0);
    state.apply_bid(0, Bid::new(0, 3, 4)).unwrap();
    let report = state.apply_challenge(1).unwrap();
    assert_eq!(report.outcome.actual_count, 5);
    assert!(report.outcome.bid_stands);
    assert_eq!(state.dice_counts(), vec![3, 2]);
}

#[test]
fn no_actions_accepted_after_challenge() {
    let mut state = table(vec![vec![1, 2], vec![3, 4]], 0);
    state.apply_bid(0, Bid::new(0, 1, 2)).unwrap();
    state.apply_challenge(1).unwrap();
    assert_illegal(
        state.apply_bid(1, Bid::new(1, 2, 2)),
        IllegalActionKind::PhaseMismatch,
    );
    assert_illegal(state.apply_challenge(1), IllegalActionKind::PhaseMismatch);
}

#[test]
fn start_new_round_only_from_round_over() {
    let mut state = table(vec![vec![1], vec![2]], 0);
    assert_illegal(state.start_new_round(), IllegalActionKind::PhaseMismatch);
}

#[test]
fn loser_opens_next_round() {
    let mut state = table(vec![vec![4, 4, 2], vec![3, 3, 3], vec![5, 6]], 0);
    state.apply_bid(0, Bid::new(0, 2, 4)).unwrap();
    // Bid stands (two 4s), so the challenger loses.
    state.apply_challenge(1).unwrap();
    state.start_new_round().unwrap();

    assert_eq!(state.phase(), Phase::AwaitingAction);
    assert_eq!(state.round_no(), 2);
    assert_eq!(state.turn(), 1);
    assert!(state.current_bid().is_none());
    assert_eq!(state.dice_counts(), vec![3, 2, 2]);
    assert_eq!(state.hand_sizes(), vec![3, 2, 2]);
    assert!(matches!(
        state.history().last(),
        Some(HistoryEvent::RoundStarted { round_no: 2, opener: 1, .. })
    ));
}

#[test]
fn eliminated_player_is_skipped_and_has_empty_hand() {
    let mut state = table(vec![vec![2], vec![5], vec![6, 6]], 0);
    state.apply_bid(0, Bid::new(0, 1, 3)).unwrap();
    // No 3s anywhere: bidder 0 loses their last die.
    let report = state.apply_challenge(1).unwrap();
    assert!(report.eliminated);
    assert_eq!(state.dice_count(0), Some(0));
    assert_eq!(state.hand_sizes()[0], 0);
    assert!(matches!(
        state.history().last(),
        Some(HistoryEvent::PlayerEliminated { player: 0, .. })
    ));

    state.start_new_round().unwrap();
    // Loser is out, so the next active seat opens.
    assert_eq!(state.turn(), 1);
    assert_eq!(state.hand_sizes(), vec![0, 1, 2]);

    state.apply_bid(1, Bid::new(1, 1, 1)).unwrap();
    assert_eq!(state.turn(), 2);
    state.apply_bid(2, Bid::new(2, 1, 2)).unwrap();
    assert_eq!(state.turn(), 1, "seat 0 is skipped");
    assert_illegal(
        state.apply_bid(0, Bid::new(0, 2, 2)),
        IllegalActionKind::PlayerEliminated,
    );
}

#[test]
fn last_elimination_ends_the_game() {
    let mut state = table(vec![vec![1], vec![3]], 0);
    state.apply_bid(0, Bid::new(0, 1, 1)).unwrap();
    let report = state.apply_challenge(1).unwrap();
    assert!(report.outcome.bid_stands);
    assert_eq!(report.outcome.loser, 1);
    assert_eq!(state.dice_counts(), vec![1, 0]);
    assert_eq!(state.phase(), Phase::RoundOver);

    state.start_new_round().unwrap();
    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.is_game_over());
    assert_eq!(state.winner(), Some(0));
    assert!(matches!(
        state.history().last(),
        Some(HistoryEvent::GameOver { winner: 0, .. })
    ));
    assert_illegal(state.start_new_round(), IllegalActionKind::PhaseMismatch);
}

#[test]
fn projection_hides_other_hands() {
    let mut s = setup(3);
    s.history_window = 2;
    let mut state = RoundState::with_hands(&s, vec![vec![1, 2], vec![3], vec![4, 5, 6]], 0).unwrap();
    state.apply_bid(0, Bid::new(0, 1, 5)).unwrap();
    state.apply_bid(1, Bid::new(1, 2, 5)).unwrap();

    let view = state.project_for(2).unwrap();
    assert_eq!(view.player, 2);
    assert_eq!(view.hand, vec![4, 5, 6]);
    assert_eq!(view.dice_counts, vec![2, 1, 3]);
    assert_eq!(view.total_dice, 6);
    assert_eq!(view.turn, 2);
    assert_eq!(view.current_bid, Some(Bid::new(1, 2, 5)));
    assert_eq!(view.recent_history.len(), 2, "window bounds the history");

    let json = serde_json::to_string(&view).unwrap();
    assert!(!json.contains("\"hands\""));
    assert!(state.project_for(3).is_err());
}

#[test]
fn history_serializes_as_ordered_log() {
    let mut state = table(vec![vec![1], vec![2]], 0);
    state.apply_bid(0, Bid::new(0, 1, 2)).unwrap();
    state.apply_challenge(1).unwrap();
    let json = state.history_json().unwrap();
    let events: Vec<HistoryEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(events, state.history());
}

#[test]
fn next_active_skips_empty_seats() {
    assert_eq!(next_active(&[1, 0, 0, 2], 0), Some(3));
    assert_eq!(next_active(&[1, 0, 0, 2], 3), Some(0));
    assert_eq!(next_active(&[0, 3, 0], 1), Some(1));
    assert_eq!(next_active(&[0, 0], 0), None);
}
