pub mod cleanup;
pub mod games;

pub use cleanup::spawn_stale_sweeper;
pub use games::{GameRecord, GameService, GameSummary};
