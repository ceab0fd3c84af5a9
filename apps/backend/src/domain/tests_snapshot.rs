use crate::domain::round::RoundKind;
use crate::domain::snapshot::{GameSnapshot, SCHEMA_VERSION};
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{enter_tricks, go_to_first, started_game};
use crate::errors::domain::{DomainError, ValidationKind};

/// Three players, first round scored, currently on round 1.
fn game_with_history() -> GameState {
    let mut state = started_game(3);
    for (player, bid) in [1, 0, 1].into_iter().enumerate() {
        state.set_bid(player, Some(bid)).unwrap();
    }
    enter_tricks(&mut state, &[1, 0, 0]);
    state.advance_round().unwrap();
    state.set_bid(0, Some(2)).unwrap();
    state
}

fn assert_invalid(snapshot: GameSnapshot) {
    match snapshot.restore() {
        Err(DomainError::Validation(ValidationKind::InvalidSnapshot, _)) => {}
        other => panic!("expected InvalidSnapshot, got {other:?}"),
    }
}

#[test]
fn restore_reproduces_the_captured_state() {
    let state = game_with_history();
    let json = GameSnapshot::to_json(&state).unwrap();
    let restored = GameSnapshot::from_json(&json).unwrap().restore().unwrap();
    assert_eq!(restored, state);
}

#[test]
fn fresh_and_finished_games_restore() {
    let fresh = GameState::new();
    assert_eq!(GameSnapshot::capture(&fresh).restore().unwrap(), fresh);

    let mut finished = game_with_history();
    finished.end_game_early().unwrap();
    assert_eq!(GameSnapshot::capture(&finished).restore().unwrap(), finished);
}

#[test]
fn snapshot_json_uses_snake_case_tags() {
    let mut state = started_game(3);
    go_to_first(&mut state, RoundKind::Misere);
    let value = serde_json::to_value(GameSnapshot::capture(&state)).unwrap();
    assert_eq!(value["schema_version"], SCHEMA_VERSION);
    assert_eq!(value["phase"], "in_progress");
    assert_eq!(value["rounds"][0]["kind"], "ordinary");
    assert_eq!(value["rounds"][0]["bids"][0], serde_json::Value::Null);
}

#[test]
fn malformed_json_is_an_invalid_snapshot() {
    let err = GameSnapshot::from_json("{\"schema_version\": 1").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidSnapshot, _)
    ));
}

#[test]
fn wrong_schema_version_is_rejected() {
    let mut snapshot = GameSnapshot::capture(&game_with_history());
    snapshot.schema_version = SCHEMA_VERSION + 1;
    assert_invalid(snapshot);
}

#[test]
fn unsupported_roster_is_rejected() {
    let mut snapshot = GameSnapshot::capture(&started_game(3));
    snapshot.players.truncate(2);
    assert_invalid(snapshot);
}

#[test]
fn pointer_must_match_phase() {
    let mut in_progress = GameSnapshot::capture(&started_game(3));
    in_progress.current_round_index = in_progress.rounds.len();
    assert_invalid(in_progress);

    let mut finished = GameSnapshot::capture(&started_game(3));
    finished.phase = Phase::Finished;
    assert_invalid(finished);
}

#[test]
fn entries_above_the_deal_are_rejected() {
    let mut snapshot = GameSnapshot::capture(&started_game(4));
    snapshot.rounds[0].tricks_taken[1] = Some(2);
    assert_invalid(snapshot);
}

#[test]
fn nonzero_misere_bid_is_rejected() {
    let mut state = started_game(4);
    let index = go_to_first(&mut state, RoundKind::Misere);
    let mut snapshot = GameSnapshot::capture(&state);
    snapshot.rounds[index].bids[2] = Some(1);
    assert_invalid(snapshot);
}

#[test]
fn pass_streak_above_limit_is_rejected() {
    let mut snapshot = GameSnapshot::capture(&started_game(3));
    snapshot.players[0].consecutive_passes = 3;
    assert_invalid(snapshot);
}

#[test]
fn three_passes_in_a_row_are_rejected() {
    let mut state = started_game(3);
    state.set_bid(0, Some(0)).unwrap();
    let mut snapshot = GameSnapshot::capture(&state);
    snapshot.rounds[1].bids[0] = Some(0);
    snapshot.rounds[2].bids[0] = Some(0);
    assert_invalid(snapshot);
}

#[test]
fn pass_streak_must_match_the_bids() {
    let mut state = started_game(3);
    state.set_bid(0, Some(0)).unwrap();
    let mut snapshot = GameSnapshot::capture(&state);
    assert_eq!(snapshot.players[0].consecutive_passes, 1);
    snapshot.players[0].consecutive_passes = 0;
    assert_invalid(snapshot);
}

#[test]
fn oversized_history_scores_are_rejected() {
    let mut snapshot = GameSnapshot::capture(&game_with_history());
    for entry in &mut snapshot.history {
        entry.round_score = i32::MAX;
        entry.total_score_after = i32::MAX;
    }
    for player in &mut snapshot.players {
        player.total_score = i32::MAX;
    }
    assert_invalid(snapshot);
}

#[test]
fn history_score_bound_follows_the_deal() {
    // Round 1 deals one card: no score can exceed 20 points either way.
    let mut snapshot = GameSnapshot::capture(&game_with_history());
    let entry = snapshot
        .history
        .iter_mut()
        .find(|e| e.player == 0)
        .unwrap();
    entry.round_score = 30;
    entry.total_score_after = 30;
    snapshot.players[0].total_score = 30;
    assert_invalid(snapshot);
}

#[test]
fn tampered_history_is_rejected() {
    let mut snapshot = GameSnapshot::capture(&game_with_history());
    snapshot.history[0].round_score += 1;
    assert_invalid(snapshot);

    let mut snapshot = GameSnapshot::capture(&game_with_history());
    snapshot.players[1].total_score = 99;
    assert_invalid(snapshot);

    let mut snapshot = GameSnapshot::capture(&game_with_history());
    snapshot.history.pop();
    assert_invalid(snapshot);
}

#[test]
fn setup_snapshot_must_be_empty() {
    let mut snapshot = GameSnapshot::capture(&GameState::new());
    snapshot.current_round_index = 1;
    assert_invalid(snapshot);
}
