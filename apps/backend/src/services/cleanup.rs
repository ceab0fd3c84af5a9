//! Periodic removal of abandoned games.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::services::games::GameService;

/// Spawn a task that removes games idle for longer than `ttl`, once every
/// `every`. The first sweep runs one full period after startup.
pub fn spawn_stale_sweeper(
    service: Arc<GameService>,
    ttl: time::Duration,
    every: std::time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match service.sweep_stale(ttl, OffsetDateTime::now_utc()).await {
                Ok(0) => debug!("no stale games"),
                Ok(removed) => info!(removed, "removed stale games"),
                Err(e) => warn!(error = %e, "stale game sweep failed"),
            }
        }
    })
}
