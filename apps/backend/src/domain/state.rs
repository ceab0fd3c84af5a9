use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::bidding::{
    ensure_bid_total_legal, ensure_entries_complete, pass_streak, passes_after, passes_before,
    total_bids_equals_cards, validate_bid_edit, validate_trick_edit,
};
use crate::domain::ranking::{rank, Standing};
use crate::domain::round::{Round, RoundKind};
use crate::domain::scoring::compute_round_scores;
use crate::domain::sequence::generate_rounds;
use crate::errors::domain::{DomainError, ValidationKind};

/// Index into the player roster.
pub type PlayerId = usize;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Game created, roster not entered yet.
    AwaitingPlayerSetup,
    /// Rounds are being played; `current_round_index` points at one.
    InProgress,
    /// Every round played, or the game was ended early.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    /// Zero bids in a row up to and including the current round; never
    /// above `MAX_CONSECUTIVE_PASSES`. Derived from the rounds' bids.
    pub consecutive_passes: u8,
    pub total_score: i32,
}

impl PlayerState {
    /// Blank names fall back to `"Player N"` (1-based seat).
    pub fn new(name: &str, seat: PlayerId) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            format!("Player {}", seat + 1)
        } else {
            trimmed.to_string()
        };
        Self {
            name,
            consecutive_passes: 0,
            total_score: 0,
        }
    }
}

/// One player's result for one closed round. Never modified once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistoryEntry {
    pub player: PlayerId,
    pub player_name: String,
    pub round_index: usize,
    pub bid: u8,
    pub tricks_taken: u8,
    pub round_score: i32,
    pub total_score_after: i32,
}

/// Result of a bid edit the caller may want to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidOutcome {
    /// All bids are in and they add up to the cards dealt.
    pub forbidden_total: bool,
}

/// Entire game container: roster, rounds, pointer and score log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) phase: Phase,
    pub(crate) players: Vec<PlayerState>,
    pub(crate) rounds: Vec<Round>,
    pub(crate) current_round_index: usize,
    /// Newest entry first.
    pub(crate) history: VecDeque<ScoreHistoryEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingPlayerSetup,
            players: Vec::new(),
            rounds: Vec::new(),
            current_round_index: 0,
            history: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn current_round_index(&self) -> usize {
        self.current_round_index
    }

    /// Newest-first score log.
    pub fn history(&self) -> impl Iterator<Item = &ScoreHistoryEntry> {
        self.history.iter()
    }

    /// The round being edited, while the game is in progress.
    pub fn current_round(&self) -> Option<&Round> {
        match self.phase {
            Phase::InProgress => self.rounds.get(self.current_round_index),
            Phase::AwaitingPlayerSetup | Phase::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Seat the roster and deal out the full round list.
    pub fn start_game(&mut self, player_names: &[String]) -> Result<(), DomainError> {
        self.require_phase(Phase::AwaitingPlayerSetup, "start the game")?;
        let rounds = generate_rounds(player_names.len())?;

        self.players = player_names
            .iter()
            .enumerate()
            .map(|(seat, name)| PlayerState::new(name, seat))
            .collect();
        self.rounds = rounds;
        self.current_round_index = 0;
        self.history.clear();
        self.phase = Phase::InProgress;
        self.enter_current_round();

        debug!(
            players = self.players.len(),
            rounds = self.rounds.len(),
            "game started"
        );
        Ok(())
    }

    /// Record (or clear) `player`'s bid for the current round.
    ///
    /// Re-entering the bid already on record changes nothing. Clearing a
    /// pass takes it out of the player's streak.
    pub fn set_bid(&mut self, player: PlayerId, value: Option<u8>) -> Result<BidOutcome, DomainError> {
        let index = self.require_open_round("enter a bid")?;
        self.require_player(player)?;

        let round = &self.rounds[index];
        let previous = round.bids[player];
        if previous == value {
            return Ok(BidOutcome {
                forbidden_total: total_bids_equals_cards(round),
            });
        }
        if round.kind == RoundKind::Misere {
            return Err(DomainError::validation(
                ValidationKind::MisereBidFixed,
                "Bids are fixed at 0 in a Misère round",
            ));
        }
        let neighbouring = passes_before(&self.rounds, index, player)
            .saturating_add(passes_after(&self.rounds, index, player));
        validate_bid_edit(round, player, value, &self.players[player].name, neighbouring)?;

        let round = &mut self.rounds[index];
        round.bids[player] = value;
        let forbidden_total = total_bids_equals_cards(round);
        self.refresh_pass_streaks();

        debug!(
            round_index = index,
            player,
            bid = ?value,
            consecutive_passes = self.players[player].consecutive_passes,
            forbidden_total,
            "bid recorded"
        );
        Ok(BidOutcome { forbidden_total })
    }

    /// Record (or clear) how many tricks `player` took in the current round.
    pub fn set_tricks(&mut self, player: PlayerId, value: Option<u8>) -> Result<(), DomainError> {
        let index = self.require_open_round("enter tricks")?;
        self.require_player(player)?;
        validate_trick_edit(&self.rounds[index], player, value)?;

        self.rounds[index].tricks_taken[player] = value;
        debug!(round_index = index, player, tricks = ?value, "tricks recorded");
        Ok(())
    }

    /// Move the pointer to `index`. Out-of-range requests, and requests
    /// outside an in-progress game, are ignored. Never scores a round.
    ///
    /// Returns whether the pointer moved.
    pub fn go_to_round(&mut self, index: usize) -> bool {
        if self.phase != Phase::InProgress || index >= self.rounds.len() {
            return false;
        }
        if index == self.current_round_index {
            return false;
        }
        self.current_round_index = index;
        self.enter_current_round();
        debug!(round_index = index, "moved to round");
        true
    }

    pub fn previous_round(&mut self) -> bool {
        match self.current_round_index.checked_sub(1) {
            Some(index) => self.go_to_round(index),
            None => false,
        }
    }

    /// Score the current round (unless already closed) and move on.
    ///
    /// Finishes the game after the last round. Either everything happens
    /// or nothing does.
    pub fn advance_round(&mut self) -> Result<Option<Vec<i32>>, DomainError> {
        self.require_phase(Phase::InProgress, "advance")?;
        let index = self.current_round_index;
        let round = self.current_round_mut("advance")?;
        ensure_entries_complete(round)?;
        ensure_bid_total_legal(round)?;

        let scores = self.close_current_round()?;

        if index + 1 < self.rounds.len() {
            self.current_round_index = index + 1;
            self.enter_current_round();
            debug!(round_index = index + 1, "advanced to next round");
        } else {
            self.finish();
        }
        Ok(scores)
    }

    /// Stop the game now.
    ///
    /// The current round is closed and scored only when it is complete and
    /// its bid total is legal. An incomplete or illegal round cannot be
    /// scored, so it is left open rather than force-closed with made-up
    /// entries; the game still finishes.
    pub fn end_game_early(&mut self) -> Result<Option<Vec<i32>>, DomainError> {
        self.require_phase(Phase::InProgress, "end the game")?;
        let round = self.current_round_mut("end the game")?;

        let scoreable = round.is_complete() && !total_bids_equals_cards(round);
        let scores = if scoreable {
            self.close_current_round()?
        } else {
            debug!(
                round_index = self.current_round_index,
                "ending early with an unscoreable round"
            );
            None
        };
        self.finish();
        Ok(scores)
    }

    /// Final standings, best first.
    pub fn standings(&self) -> Vec<Standing> {
        rank(&self.players)
    }

    fn finish(&mut self) {
        self.current_round_index = self.rounds.len();
        self.phase = Phase::Finished;
        self.refresh_pass_streaks();
        debug!(rounds = self.rounds.len(), "game finished");
    }

    /// Close the current round, add its scores to the totals and log them.
    fn close_current_round(&mut self) -> Result<Option<Vec<i32>>, DomainError> {
        let index = self.current_round_index;
        let round = self.current_round_mut("score")?;
        let Some(scores) = compute_round_scores(round)? else {
            return Ok(None);
        };

        let round = &self.rounds[index];
        for (player, (state, &score)) in self.players.iter_mut().zip(&scores).enumerate() {
            state.total_score += score;
            self.history.push_front(ScoreHistoryEntry {
                player,
                player_name: state.name.clone(),
                round_index: index,
                bid: round.bids[player].unwrap_or(0),
                tricks_taken: round.tricks_taken[player].unwrap_or(0),
                round_score: score,
                total_score_after: state.total_score,
            });
        }
        debug!(round_index = index, scores = ?scores, "round closed");
        Ok(Some(scores))
    }

    fn enter_current_round(&mut self) {
        if let Some(round) = self.rounds.get_mut(self.current_round_index) {
            round.force_misere_bids();
        }
        self.refresh_pass_streaks();
    }

    fn refresh_pass_streaks(&mut self) {
        let index = self.current_round_index;
        for (player, state) in self.players.iter_mut().enumerate() {
            state.consecutive_passes = pass_streak(&self.rounds, index, player);
        }
    }

    fn current_round_mut(&mut self, action: &str) -> Result<&mut Round, DomainError> {
        let index = self.current_round_index;
        self.rounds.get_mut(index).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Cannot {action}: no round at index {index}"),
            )
        })
    }

    fn require_open_round(&self, action: &str) -> Result<usize, DomainError> {
        self.require_phase(Phase::InProgress, action)?;
        let index = self.current_round_index;
        match self.rounds.get(index) {
            Some(round) if round.closed => Err(DomainError::validation(
                ValidationKind::RoundClosed,
                format!("Round {} is already scored", index + 1),
            )),
            Some(_) => Ok(index),
            None => Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!("Cannot {action}: no round at index {index}"),
            )),
        }
    }

    fn require_phase(&self, expected: Phase, action: &str) -> Result<(), DomainError> {
        if self.phase == expected {
            return Ok(());
        }
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Cannot {action} while the game is {:?}", self.phase),
        ))
    }

    fn require_player(&self, player: PlayerId) -> Result<(), DomainError> {
        if player < self.players.len() {
            return Ok(());
        }
        Err(DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("No player at seat {player}"),
        ))
    }
}
