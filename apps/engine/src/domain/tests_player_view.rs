use crate::domain::action::Action;
use crate::domain::bidding::Bid;
use crate::domain::test_state_helpers::table;
use crate::errors::domain::IllegalActionKind;

#[test]
fn fallback_is_minimum_bid_on_open_table() {
    let state = table(vec![vec![3, 3], vec![6]], 0);
    let view = state.project_for(0).unwrap();
    assert_eq!(view.turn, view.player);
    assert!(!view.can_challenge());
    assert_eq!(view.fallback_action(), Action::bid(1, 1));
    assert!(view.check(&view.fallback_action()).is_ok());
}

#[test]
fn fallback_is_challenge_once_a_bid_exists() {
    let mut state = table(vec![vec![3, 3], vec![6]], 0);
    state.apply_bid(0, Bid::new(0, 3, 6)).unwrap();
    let view = state.project_for(1).unwrap();
    assert_eq!(view.fallback_action(), Action::Challenge);
    assert!(view.check(&Action::Challenge).is_ok());
}

#[test]
fn check_mirrors_bid_legality() {
    let mut state = table(vec![vec![3, 3], vec![6]], 0);
    let opening = state.project_for(0).unwrap();
    assert_eq!(
        opening
            .check(&Action::Challenge)
            .unwrap_err()
            .illegal_kind(),
        Some(&IllegalActionKind::NoCurrentBid)
    );
    assert_eq!(
        opening.check(&Action::bid(4, 2)).unwrap_err().illegal_kind(),
        Some(&IllegalActionKind::QuantityOutOfRange)
    );

    state.apply_bid(0, Bid::new(0, 2, 3)).unwrap();
    let view = state.project_for(1).unwrap();
    assert!(view.check(&Action::bid(2, 4)).is_ok());
    assert_eq!(
        view.check(&Action::bid(2, 3)).unwrap_err().illegal_kind(),
        Some(&IllegalActionKind::BidNotHigher)
    );
}

#[test]
fn unseen_dice_excludes_own_hand() {
    let state = table(vec![vec![3, 3], vec![6], vec![1, 2, 4]], 0);
    let view = state.project_for(2).unwrap();
    assert_eq!(view.total_dice, 6);
    assert_eq!(view.unseen_dice(), 3);
    assert_eq!(view.active_players(), 3);
    assert_eq!(view.minimum_raise(), Some(Bid::new(2, 1, 1)));
}
