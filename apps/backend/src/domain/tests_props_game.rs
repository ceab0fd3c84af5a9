use proptest::prelude::*;

use crate::domain::rules::MAX_CONSECUTIVE_PASSES;
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::started_game;
use crate::errors::domain::{DomainError, ValidationKind};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Whatever the edit sequence, nobody's pass streak exceeds the limit,
    /// and a rejected pass leaves the game exactly as it was.
    #[test]
    fn prop_pass_streak_is_capped(
        players in test_gens::player_count(),
        edits in test_gens::bid_edits(1, 24),
    ) {
        let mut state = started_game(players);
        let ordinary_rounds = state.rounds().iter().filter(|r| !r.kind.is_special()).count();

        for (step, edit) in edits.into_iter().enumerate() {
            // One edit per round, walking the ordinary deals.
            state.go_to_round(step % ordinary_rounds);
            let before = state.clone();

            match state.set_bid(0, edit) {
                Ok(_) => {}
                Err(DomainError::Validation(ValidationKind::PassLimitExceeded, _)) => {
                    prop_assert_eq!(edit, Some(0));
                    prop_assert_eq!(&state, &before);
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error {e}"))),
            }
            prop_assert!(state.players()[0].consecutive_passes <= MAX_CONSECUTIVE_PASSES);
        }
    }

    /// A rejected event through `apply` hands back the input state.
    #[test]
    fn prop_rejected_bids_keep_state(
        players in test_gens::player_count(),
        value in 2u8..=20u8,
    ) {
        use crate::domain::game_transition::{apply, GameEvent};

        // Round 0 deals one card, so any bid of 2 or more is out of range.
        let state = started_game(players);
        let (next, result) = apply(state.clone(), GameEvent::SetBid { player: 0, value: Some(value) });
        prop_assert!(
            matches!(result, Err(DomainError::Validation(ValidationKind::OutOfRange, _))),
            "expected OutOfRange"
        );
        prop_assert_eq!(next, state);
    }
}
