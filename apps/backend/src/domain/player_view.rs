//! Read-only views of a game for the presentation layer.
//!
//! Nothing here computes scores: every number comes from the state's
//! totals and score history.

use serde::{Deserialize, Serialize};

use crate::domain::bidding::total_bids_equals_cards;
use crate::domain::ranking::{podium, Podium};
use crate::domain::round::RoundKind;
use crate::domain::rules::RECENT_HISTORY_LEN;
use crate::domain::state::{GameState, Phase, PlayerId, ScoreHistoryEntry};

/// One row of the score table for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub player: PlayerId,
    pub name: String,
    pub bid: Option<u8>,
    pub tricks_taken: Option<u8>,
    /// Present once the round has been scored.
    pub round_score: Option<i32>,
    pub total_score: i32,
    pub consecutive_passes: u8,
}

/// Entry in the round strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundLabel {
    pub index: usize,
    pub label: String,
    pub kind: RoundKind,
    pub cards_dealt: u8,
    pub closed: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentRoundView {
    pub index: usize,
    pub label: String,
    pub kind: RoundKind,
    pub cards_dealt: u8,
    pub closed: bool,
    /// Bids may not be edited in a Misère round.
    pub bids_locked: bool,
    /// All bids are in and add up to the cards dealt.
    pub forbidden_total: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub player: PlayerId,
    pub name: String,
    /// Newest first.
    pub entries: Vec<ScoreHistoryEntry>,
}

/// Everything a client needs to draw the game screen or the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: Phase,
    pub current_round: Option<CurrentRoundView>,
    pub rounds: Vec<RoundLabel>,
    pub score_table: Vec<ScoreRow>,
    pub recent_history: Vec<PlayerHistory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standings: Option<Podium>,
}

pub fn round_labels(state: &GameState) -> Vec<RoundLabel> {
    let active = state.current_round().map(|_| state.current_round_index());
    state
        .rounds()
        .iter()
        .enumerate()
        .map(|(index, round)| RoundLabel {
            index,
            label: round.display_label(index),
            kind: round.kind,
            cards_dealt: round.cards_dealt,
            closed: round.is_closed(),
            active: active == Some(index),
        })
        .collect()
}

pub fn current_round_view(state: &GameState) -> Option<CurrentRoundView> {
    let index = state.current_round_index();
    state.current_round().map(|round| CurrentRoundView {
        index,
        label: round.display_label(index),
        kind: round.kind,
        cards_dealt: round.cards_dealt,
        closed: round.is_closed(),
        bids_locked: round.kind == RoundKind::Misere,
        forbidden_total: total_bids_equals_cards(round),
    })
}

/// Per-player row for the current round; round scores are looked up in
/// the history rather than recomputed.
pub fn score_table(state: &GameState) -> Vec<ScoreRow> {
    let index = state.current_round_index();
    let round = state.current_round();

    state
        .players()
        .iter()
        .enumerate()
        .map(|(player, p)| ScoreRow {
            player,
            name: p.name.clone(),
            bid: round.and_then(|r| r.bids[player]),
            tricks_taken: round.and_then(|r| r.tricks_taken[player]),
            round_score: round.and_then(|_| {
                state
                    .history()
                    .find(|e| e.player == player && e.round_index == index)
                    .map(|e| e.round_score)
            }),
            total_score: p.total_score,
            consecutive_passes: p.consecutive_passes,
        })
        .collect()
}

/// Up to `per_player` newest history entries for every player. Players
/// with no history yet get an empty list.
pub fn recent_history(state: &GameState, per_player: usize) -> Vec<PlayerHistory> {
    state
        .players()
        .iter()
        .enumerate()
        .map(|(player, p)| PlayerHistory {
            player,
            name: p.name.clone(),
            entries: state
                .history()
                .filter(|e| e.player == player)
                .take(per_player)
                .cloned()
                .collect(),
        })
        .collect()
}

pub fn game_view(state: &GameState) -> GameView {
    GameView {
        phase: state.phase(),
        current_round: current_round_view(state),
        rounds: round_labels(state),
        score_table: score_table(state),
        recent_history: recent_history(state, RECENT_HISTORY_LEN),
        standings: state.is_finished().then(|| podium(state.players())),
    }
}
