use crate::domain::bidding::{
    check_successor, is_legal_successor, legal_successors, minimum_bid, minimum_raise, Bid,
};
use crate::errors::domain::IllegalActionKind;

fn kind_of(current: Option<&Bid>, proposed: &Bid, total: u32) -> Option<IllegalActionKind> {
    check_successor(current, proposed, total, 2)
        .err()
        .and_then(|e| e.illegal_kind().cloned())
}

#[test]
fn opening_bid_accepts_any_in_range() {
    for quantity in 1..=10 {
        for face in 1..=6 {
            assert!(is_legal_successor(None, &Bid::new(0, quantity, face), 10, 2));
        }
    }
}

#[test]
fn opening_bid_rejects_out_of_range() {
    assert_eq!(
        kind_of(None, &Bid::new(0, 0, 3), 10),
        Some(IllegalActionKind::QuantityOutOfRange)
    );
    assert_eq!(
        kind_of(None, &Bid::new(0, 11, 3), 10),
        Some(IllegalActionKind::QuantityOutOfRange)
    );
    assert_eq!(
        kind_of(None, &Bid::new(0, 2, 0), 10),
        Some(IllegalActionKind::FaceOutOfRange)
    );
    assert_eq!(
        kind_of(None, &Bid::new(0, 2, 7), 10),
        Some(IllegalActionKind::FaceOutOfRange)
    );
}

#[test]
fn higher_quantity_any_face_is_legal() {
    let current = Bid::new(0, 3, 6);
    assert!(is_legal_successor(Some(&current), &Bid::new(1, 4, 1), 10, 2));
    assert!(is_legal_successor(Some(&current), &Bid::new(1, 4, 6), 10, 2));
}

#[test]
fn same_quantity_needs_higher_face() {
    let current = Bid::new(0, 3, 4);
    assert!(is_legal_successor(Some(&current), &Bid::new(1, 3, 5), 10, 2));
    assert_eq!(
        kind_of(Some(&current), &Bid::new(1, 3, 4), 10),
        Some(IllegalActionKind::BidNotHigher),
        "identical bid is illegal"
    );
    assert_eq!(
        kind_of(Some(&current), &Bid::new(1, 3, 3), 10),
        Some(IllegalActionKind::BidNotHigher),
        "same quantity lower face is illegal"
    );
}

#[test]
fn lower_quantity_is_illegal_even_with_higher_face() {
    let current = Bid::new(0, 3, 2);
    assert_eq!(
        kind_of(Some(&current), &Bid::new(1, 2, 6), 10),
        Some(IllegalActionKind::BidNotHigher)
    );
}

#[test]
fn bidding_needs_two_active_players() {
    assert!(!is_legal_successor(None, &Bid::new(0, 1, 1), 3, 1));
}

#[test]
fn minimum_raise_steps_face_then_quantity() {
    assert_eq!(minimum_raise(None, 2, 5), Some(minimum_bid(2)));
    assert_eq!(
        minimum_raise(Some(&Bid::new(0, 2, 3)), 1, 5),
        Some(Bid::new(1, 2, 4))
    );
    assert_eq!(
        minimum_raise(Some(&Bid::new(0, 2, 6)), 1, 5),
        Some(Bid::new(1, 3, 1))
    );
    assert_eq!(minimum_raise(Some(&Bid::new(0, 5, 6)), 1, 5), None);
}

#[test]
fn legal_successors_are_exactly_the_legal_bids() {
    let current = Bid::new(0, 2, 5);
    let successors = legal_successors(Some(&current), 1, 3);
    let expected: Vec<Bid> = [(2, 6), (3, 1), (3, 2), (3, 3), (3, 4), (3, 5), (3, 6)]
        .into_iter()
        .map(|(q, f)| Bid::new(1, q, f))
        .collect();
    assert_eq!(successors, expected);
    assert_eq!(legal_successors(None, 0, 2).len(), 12);
    assert!(legal_successors(Some(&Bid::new(0, 3, 6)), 1, 3).is_empty());
}
