//! Tests for the consecutive-pass rule as enforced through `GameState`.
//!
//! - A player may bid 0 in at most two rounds in a row
//! - The third zero bid is rejected and the entry stays as it was
//! - Any non-zero bid resets the streak
//! - Clearing a pass takes it out of the streak

use crate::domain::state::GameState;
use crate::domain::test_state_helpers::{enter_tricks, started_game};
use crate::errors::domain::{DomainError, ValidationKind};

/// Bid for every player, fill tricks so the round is legal, and advance.
fn play_round(state: &mut GameState, bids: &[u8], tricks: &[u8]) {
    for (player, &bid) in bids.iter().enumerate() {
        state.set_bid(player, Some(bid)).expect("bid accepted");
    }
    enter_tricks(state, tricks);
    state.advance_round().expect("round advances");
}

#[test]
fn two_passes_allowed_third_rejected() {
    let mut state = started_game(3);
    // Deals 1, 2, 3 for three players.
    play_round(&mut state, &[0, 0, 0], &[1, 0, 0]);
    play_round(&mut state, &[0, 1, 0], &[0, 1, 1]);
    assert_eq!(state.players()[0].consecutive_passes, 2);
    assert_eq!(state.players()[1].consecutive_passes, 0);

    let err = state.set_bid(0, Some(0)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PassLimitExceeded, _)
    ));
    assert_eq!(state.current_round().unwrap().bids[0], None);
    assert_eq!(state.players()[0].consecutive_passes, 2);
}

#[test]
fn non_zero_bid_resets_streak() {
    let mut state = started_game(3);
    play_round(&mut state, &[0, 1, 1], &[0, 1, 0]);
    play_round(&mut state, &[0, 1, 0], &[0, 1, 1]);
    assert_eq!(state.players()[0].consecutive_passes, 2);

    play_round(&mut state, &[1, 1, 0], &[1, 1, 1]);
    assert_eq!(state.players()[0].consecutive_passes, 0);

    state.set_bid(0, Some(0)).expect("streak was broken");
    assert_eq!(state.players()[0].consecutive_passes, 1);
}

#[test]
fn players_tracked_independently() {
    let mut state = started_game(4);
    play_round(&mut state, &[0, 0, 1, 1], &[0, 0, 1, 0]);
    let passes: Vec<u8> = state
        .players()
        .iter()
        .map(|p| p.consecutive_passes)
        .collect();
    assert_eq!(passes, [1, 1, 0, 0]);
}

#[test]
fn re_entering_the_same_pass_does_not_count_twice() {
    let mut state = started_game(3);
    state.set_bid(0, Some(0)).unwrap();
    state.set_bid(0, Some(0)).unwrap();
    assert_eq!(state.players()[0].consecutive_passes, 1);
}

#[test]
fn clearing_a_pass_drops_it_from_the_streak() {
    let mut state = started_game(3);
    state.set_bid(0, Some(0)).unwrap();
    state.set_bid(0, None).unwrap();
    assert_eq!(state.players()[0].consecutive_passes, 0);
    assert_eq!(state.current_round().unwrap().bids[0], None);
}

#[test]
fn pass_cleared_and_re_entered_counts_once() {
    let mut state = started_game(3);
    state.set_bid(0, Some(0)).unwrap();
    state.set_bid(0, None).unwrap();
    state.set_bid(0, Some(0)).unwrap();
    assert_eq!(state.players()[0].consecutive_passes, 1);

    for (player, bid) in [(1, 1), (2, 1)] {
        state.set_bid(player, Some(bid)).unwrap();
    }
    enter_tricks(&mut state, &[0, 1, 0]);
    state.advance_round().unwrap();
    assert_eq!(state.players()[0].consecutive_passes, 1);

    // Only the second pass in a row.
    state.set_bid(0, Some(0)).expect("second pass allowed");
    assert_eq!(state.players()[0].consecutive_passes, 2);
}

#[test]
fn pass_that_would_join_later_passes_is_rejected() {
    let mut state = started_game(3);
    // Passes already entered in rounds 2 and 3.
    for index in [1, 2] {
        state.go_to_round(index);
        state.set_bid(0, Some(0)).unwrap();
    }
    state.go_to_round(0);
    assert_eq!(state.players()[0].consecutive_passes, 0);

    let err = state.set_bid(0, Some(0)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PassLimitExceeded, _)
    ));
}

#[test]
fn streak_follows_the_current_round() {
    let mut state = started_game(3);
    play_round(&mut state, &[0, 1, 1], &[0, 1, 0]);
    play_round(&mut state, &[0, 1, 0], &[0, 1, 1]);
    assert_eq!(state.players()[0].consecutive_passes, 2);

    state.go_to_round(0);
    assert_eq!(state.players()[0].consecutive_passes, 1);
    state.go_to_round(2);
    assert_eq!(state.players()[0].consecutive_passes, 2);
}
