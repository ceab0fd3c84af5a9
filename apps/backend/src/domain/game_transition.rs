//! Event-driven transitions over `GameState`.
//!
//! `apply` is the single entry point for changing a game: it takes a state
//! and an event and returns the next state with the outcome. A rejected
//! event hands back the input state untouched.

use serde::{Deserialize, Serialize};

use crate::domain::state::{GameState, Phase, PlayerId};
use crate::errors::domain::DomainError;

/// Player input that may change a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Start { player_names: Vec<String> },
    SetBid { player: PlayerId, value: Option<u8> },
    SetTricks { player: PlayerId, value: Option<u8> },
    GoToRound { round_index: usize },
    PreviousRound,
    AdvanceRound,
    EndGameEarly,
}

/// Observable effect of an applied event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    /// Edge-triggered: roster seated, rounds dealt.
    GameStarted,

    /// Explicit: a bid changed. `forbidden_total` flags an illegal bid sum.
    BidRecorded {
        player: PlayerId,
        value: Option<u8>,
        forbidden_total: bool,
    },

    /// Explicit: a tricks-taken entry changed.
    TricksRecorded { player: PlayerId, value: Option<u8> },

    /// Edge-triggered: the current round pointer moved.
    RoundChanged { from: usize, to: usize },

    /// Edge-triggered: a round was scored and locked.
    RoundClosed { round_index: usize, scores: Vec<i32> },

    /// Edge-triggered: the game reached Finished.
    GameFinished,
}

/// Apply `event` to `state`.
pub fn apply(
    state: GameState,
    event: GameEvent,
) -> (GameState, Result<Vec<GameTransition>, DomainError>) {
    let mut next = state.clone();

    let mut transitions = match run(&mut next, &event) {
        Ok(explicit) => explicit,
        Err(e) => return (state, Err(e)),
    };

    transitions.extend(derive_game_transitions(&state, &next));
    (next, Ok(transitions))
}

fn run(state: &mut GameState, event: &GameEvent) -> Result<Vec<GameTransition>, DomainError> {
    match event {
        GameEvent::Start { player_names } => {
            state.start_game(player_names)?;
        }
        GameEvent::SetBid { player, value } => {
            let before = state.current_round().map(|r| r.bids.get(*player).copied());
            let outcome = state.set_bid(*player, *value)?;
            if before != Some(Some(*value)) {
                return Ok(vec![GameTransition::BidRecorded {
                    player: *player,
                    value: *value,
                    forbidden_total: outcome.forbidden_total,
                }]);
            }
        }
        GameEvent::SetTricks { player, value } => {
            let before = state
                .current_round()
                .map(|r| r.tricks_taken.get(*player).copied());
            state.set_tricks(*player, *value)?;
            if before != Some(Some(*value)) {
                return Ok(vec![GameTransition::TricksRecorded {
                    player: *player,
                    value: *value,
                }]);
            }
        }
        GameEvent::GoToRound { round_index } => {
            state.go_to_round(*round_index);
        }
        GameEvent::PreviousRound => {
            state.previous_round();
        }
        GameEvent::AdvanceRound => {
            state.advance_round()?;
        }
        GameEvent::EndGameEarly => {
            state.end_game_early()?;
        }
    }
    Ok(Vec::new())
}

/// Derive edge-triggered transitions from before/after state.
pub fn derive_game_transitions(before: &GameState, after: &GameState) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Game start (AwaitingPlayerSetup -> InProgress)
    if before.phase == Phase::AwaitingPlayerSetup && after.phase == Phase::InProgress {
        transitions.push(GameTransition::GameStarted);
    }

    // 2. Rounds that became closed, in round order
    if before.rounds.len() == after.rounds.len() {
        for (round_index, (b, a)) in before.rounds.iter().zip(&after.rounds).enumerate() {
            if !b.closed && a.closed {
                let mut scores: Vec<(PlayerId, i32)> = after
                    .history
                    .iter()
                    .filter(|e| e.round_index == round_index)
                    .map(|e| (e.player, e.round_score))
                    .collect();
                scores.sort_by_key(|&(player, _)| player);
                transitions.push(GameTransition::RoundClosed {
                    round_index,
                    scores: scores.into_iter().map(|(_, s)| s).collect(),
                });
            }
        }
    }

    // 3. Pointer moved within an active game
    if after.phase == Phase::InProgress
        && before.phase == Phase::InProgress
        && before.current_round_index != after.current_round_index
    {
        transitions.push(GameTransition::RoundChanged {
            from: before.current_round_index,
            to: after.current_round_index,
        });
    }

    // 4. Game end (!Finished -> Finished)
    if before.phase != Phase::Finished && after.phase == Phase::Finished {
        transitions.push(GameTransition::GameFinished);
    }

    transitions
}
