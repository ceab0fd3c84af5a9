//! Serializable snapshot of a game, suitable for verbatim persistence.
//!
//! `restore` rebuilds a `GameState` exactly as captured. Closed rounds are
//! trusted as recorded and never rescored; the snapshot is only checked for
//! internal consistency.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::bidding::{longest_pass_run, pass_streak, total_bids_equals_cards};
use crate::domain::round::{Round, RoundKind};
use crate::domain::rules::{is_supported_player_count, MAX_CONSECUTIVE_PASSES};
use crate::domain::state::{GameState, Phase, PlayerState, ScoreHistoryEntry};
use crate::errors::domain::{DomainError, ValidationKind};

pub const SCHEMA_VERSION: u32 = 1;

/// Largest score magnitude one trick can be worth: ten points, doubled in Golda.
const MAX_POINTS_PER_TRICK: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub schema_version: u32,
    pub phase: Phase,
    pub players: Vec<PlayerState>,
    pub rounds: Vec<Round>,
    pub current_round_index: usize,
    /// Newest entry first.
    pub history: Vec<ScoreHistoryEntry>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            phase: state.phase,
            players: state.players.clone(),
            rounds: state.rounds.clone(),
            current_round_index: state.current_round_index,
            history: state.history.iter().cloned().collect(),
        }
    }

    pub fn restore(self) -> Result<GameState, DomainError> {
        self.validate()?;
        Ok(GameState {
            phase: self.phase,
            players: self.players,
            rounds: self.rounds,
            current_round_index: self.current_round_index,
            history: VecDeque::from(self.history),
        })
    }

    pub fn to_json(state: &GameState) -> Result<String, DomainError> {
        Ok(serde_json::to_string(&Self::capture(state))?)
    }

    /// Parse a snapshot document. Malformed JSON is reported as an invalid
    /// snapshot rather than an infrastructure failure.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| invalid(format!("malformed snapshot: {e}")))
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(invalid(format!(
                "unsupported schema version {} (expected {SCHEMA_VERSION})",
                self.schema_version
            )));
        }

        if self.phase == Phase::AwaitingPlayerSetup {
            if !self.players.is_empty()
                || !self.rounds.is_empty()
                || !self.history.is_empty()
                || self.current_round_index != 0
            {
                return Err(invalid("a game awaiting setup must be empty"));
            }
            return Ok(());
        }

        let player_count = self.players.len();
        if !is_supported_player_count(player_count) {
            return Err(invalid(format!("{player_count} players is not supported")));
        }

        match self.phase {
            Phase::InProgress if self.current_round_index >= self.rounds.len() => {
                return Err(invalid(format!(
                    "current round {} is past the last round",
                    self.current_round_index
                )));
            }
            Phase::Finished if self.current_round_index != self.rounds.len() => {
                return Err(invalid("a finished game must point past the last round"));
            }
            _ => {}
        }

        for (index, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(invalid(format!("player {index} has no name")));
            }
        }

        for (index, round) in self.rounds.iter().enumerate() {
            validate_round(index, round, player_count)?;
        }

        for (index, player) in self.players.iter().enumerate() {
            if longest_pass_run(&self.rounds, index) > MAX_CONSECUTIVE_PASSES {
                return Err(invalid(format!(
                    "player {index} passes more than {MAX_CONSECUTIVE_PASSES} rounds in a row"
                )));
            }
            let streak = pass_streak(&self.rounds, self.current_round_index, index);
            if player.consecutive_passes != streak {
                return Err(invalid(format!(
                    "player {index} pass streak {} does not match bids ({streak})",
                    player.consecutive_passes
                )));
            }
        }

        self.validate_history()
    }

    fn validate_history(&self) -> Result<(), DomainError> {
        let mut totals = vec![0i32; self.players.len()];
        // Oldest first, so running totals can be replayed.
        for entry in self.history.iter().rev() {
            let round = self.rounds.get(entry.round_index).ok_or_else(|| {
                invalid(format!("history references round {}", entry.round_index))
            })?;
            if !round.closed {
                return Err(invalid(format!(
                    "history references open round {}",
                    entry.round_index
                )));
            }
            let limit = i32::from(round.cards_dealt) * MAX_POINTS_PER_TRICK;
            if entry.round_score.abs() > limit {
                return Err(invalid(format!(
                    "history score {} for round {} is outside ±{limit}",
                    entry.round_score, entry.round_index
                )));
            }
            let total = totals
                .get_mut(entry.player)
                .ok_or_else(|| invalid(format!("history references player {}", entry.player)))?;
            *total = total.checked_add(entry.round_score).ok_or_else(|| {
                invalid(format!("history total for player {} overflows", entry.player))
            })?;
            if *total != entry.total_score_after {
                return Err(invalid(format!(
                    "history total for player {} after round {} is {} (expected {})",
                    entry.player, entry.round_index, entry.total_score_after, *total
                )));
            }
        }

        for (index, (player, total)) in self.players.iter().zip(&totals).enumerate() {
            if player.total_score != *total {
                return Err(invalid(format!(
                    "player {index} total {} does not match history sum {total}",
                    player.total_score
                )));
            }
        }

        let closed_rounds = self.rounds.iter().filter(|r| r.closed).count();
        if self.history.len() != closed_rounds * self.players.len() {
            return Err(invalid(format!(
                "{} history entries for {closed_rounds} closed rounds",
                self.history.len()
            )));
        }
        Ok(())
    }
}

fn validate_round(index: usize, round: &Round, player_count: usize) -> Result<(), DomainError> {
    if round.cards_dealt == 0 {
        return Err(invalid(format!("round {index} deals no cards")));
    }
    if round.bids.len() != player_count || round.tricks_taken.len() != player_count {
        return Err(invalid(format!(
            "round {index} entries do not match {player_count} players"
        )));
    }
    let out_of_range = round
        .bids
        .iter()
        .chain(&round.tricks_taken)
        .flatten()
        .any(|&v| v > round.cards_dealt);
    if out_of_range {
        return Err(invalid(format!(
            "round {index} has an entry above {}",
            round.cards_dealt
        )));
    }
    if round.kind == RoundKind::Misere && round.bids.iter().flatten().any(|&b| b != 0) {
        return Err(invalid(format!("misère round {index} has a non-zero bid")));
    }
    if round.closed && (!round.is_complete() || total_bids_equals_cards(round)) {
        return Err(invalid(format!(
            "closed round {index} has missing entries or an illegal bid total"
        )));
    }
    Ok(())
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidSnapshot, detail)
}
