//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod game_transition;
pub mod player_view;
pub mod ranking;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod sequence;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_consecutive_passes;
#[cfg(test)]
mod tests_props_game;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use game_transition::{apply, GameEvent, GameTransition};
pub use player_view::{game_view, GameView};
pub use ranking::{podium, rank, Podium, Standing};
pub use round::{Round, RoundKind};
pub use snapshot::GameSnapshot;
pub use state::{GameState, Phase, PlayerId, PlayerState, ScoreHistoryEntry};
