use crate::domain::bidding::{
    ensure_bid_total_legal, ensure_entries_complete, longest_pass_run, pass_streak, passes_after,
    passes_before, total_bids_equals_cards, validate_bid_edit, validate_trick_edit,
};
use crate::domain::round::{Round, RoundKind};
use crate::errors::domain::{DomainError, ValidationKind};

/// One round per entry, holding player 0's bid.
fn rounds_with_player_bids(kinds_and_bids: &[(RoundKind, Option<u8>)]) -> Vec<Round> {
    kinds_and_bids
        .iter()
        .map(|&(kind, bid)| {
            let mut round = Round::new(3, kind, 3);
            round.bids[0] = bid;
            round
        })
        .collect()
}

fn round_with_bids(cards: u8, bids: &[Option<u8>]) -> Round {
    let mut round = Round::new(cards, RoundKind::Ordinary, bids.len());
    round.bids = bids.to_vec();
    round
}

#[test]
fn bid_within_deal_is_accepted() {
    let round = Round::new(5, RoundKind::Ordinary, 4);
    for value in 0..=5 {
        assert!(validate_bid_edit(&round, 0, Some(value), "Anna", 0).is_ok());
    }
}

#[test]
fn bid_above_deal_is_out_of_range() {
    let round = Round::new(5, RoundKind::Ordinary, 4);
    let err = validate_bid_edit(&round, 2, Some(6), "Anna", 0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::OutOfRange, _)
    ));
}

#[test]
fn clearing_a_bid_is_always_allowed() {
    let round = Round::new(1, RoundKind::Ordinary, 3);
    assert!(validate_bid_edit(&round, 0, None, "Anna", 2).is_ok());
}

#[test]
fn third_pass_in_a_row_is_rejected() {
    let round = Round::new(3, RoundKind::Ordinary, 4);
    assert!(validate_bid_edit(&round, 0, Some(0), "Anna", 1).is_ok());

    let err = validate_bid_edit(&round, 0, Some(0), "Anna", 2).unwrap_err();
    match err {
        DomainError::Validation(ValidationKind::PassLimitExceeded, detail) => {
            assert!(detail.contains("Anna"));
        }
        other => panic!("expected PassLimitExceeded, got {other:?}"),
    }

    // A real bid is still fine after two passes.
    assert!(validate_bid_edit(&round, 0, Some(1), "Anna", 2).is_ok());
}

#[test]
fn trick_entries_are_range_checked() {
    let round = Round::new(4, RoundKind::Dark, 3);
    assert!(validate_trick_edit(&round, 1, Some(4)).is_ok());
    assert!(validate_trick_edit(&round, 1, None).is_ok());
    assert!(matches!(
        validate_trick_edit(&round, 1, Some(5)),
        Err(DomainError::Validation(ValidationKind::OutOfRange, _))
    ));
}

#[test]
fn pass_streak_is_read_from_the_bids() {
    use RoundKind::*;
    let rounds = rounds_with_player_bids(&[
        (Ordinary, Some(2)),
        (Ordinary, Some(0)),
        (Ordinary, Some(0)),
        (Ordinary, None),
        (Ordinary, Some(0)),
    ]);
    assert_eq!(passes_before(&rounds, 3, 0), 2);
    assert_eq!(passes_after(&rounds, 3, 0), 1);
    assert_eq!(pass_streak(&rounds, 2, 0), 2);
    // An empty entry breaks the streak.
    assert_eq!(pass_streak(&rounds, 4, 0), 1);
    assert_eq!(passes_before(&rounds, 1, 0), 0);
    assert_eq!(longest_pass_run(&rounds, 0), 2);
}

#[test]
fn misere_rounds_neither_count_nor_break_a_streak() {
    use RoundKind::*;
    let rounds = rounds_with_player_bids(&[
        (Dark, Some(0)),
        (Misere, Some(0)),
        (Misere, Some(0)),
        (Golda, None),
    ]);
    assert_eq!(passes_before(&rounds, 3, 0), 1);
    assert_eq!(pass_streak(&rounds, 2, 0), 1);
    assert_eq!(longest_pass_run(&rounds, 0), 1);
}

#[test]
fn forbidden_total_requires_every_bid() {
    let partial = round_with_bids(5, &[Some(2), Some(3), None, None]);
    assert!(!total_bids_equals_cards(&partial));

    let full = round_with_bids(5, &[Some(2), Some(3), Some(0), Some(0)]);
    assert!(total_bids_equals_cards(&full));

    let legal = round_with_bids(5, &[Some(1), Some(2), Some(0), Some(1)]);
    assert!(!total_bids_equals_cards(&legal));
}

#[test]
fn illegal_total_is_a_round_level_error() {
    let round = round_with_bids(5, &[Some(2), Some(3), Some(0), Some(0)]);
    let err = ensure_bid_total_legal(&round).unwrap_err();
    match err {
        DomainError::Validation(ValidationKind::IllegalBidTotal, detail) => {
            assert!(detail.contains("(5)"));
        }
        other => panic!("expected IllegalBidTotal, got {other:?}"),
    }
}

#[test]
fn missing_entries_are_counted() {
    let mut round = round_with_bids(3, &[Some(1), None, Some(0)]);
    round.tricks_taken = vec![Some(1), Some(1), None];
    let err = ensure_entries_complete(&round).unwrap_err();
    match err {
        DomainError::Validation(ValidationKind::MissingEntries, detail) => {
            assert!(detail.starts_with("1 bid(s) and 1 trick"));
        }
        other => panic!("expected MissingEntries, got {other:?}"),
    }
}
