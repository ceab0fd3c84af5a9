//! Game lifecycle service: bridges the pure engine with the game store.
//!
//! Every mutation runs load → apply → save while holding a per-game lock, so
//! concurrent requests for the same id are applied one at a time. Nothing is
//! written when the engine rejects an event.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::game_transition::{apply, GameEvent, GameTransition};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{GameState, Phase};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::games::{GameStore, StoredGame};

/// A game loaded from the store and restored into engine state.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub id: Uuid,
    pub state: GameState,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_id: Uuid,
    pub players: Vec<String>,
    pub phase: Phase,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub struct GameService {
    store: Arc<dyn GameStore>,
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl GameService {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    /// Store a fresh game awaiting its roster.
    pub async fn create(&self) -> Result<GameRecord, DomainError> {
        let id = Uuid::new_v4();
        let state = GameState::new();
        let stored = self
            .store
            .put(id, GameSnapshot::to_json(&state)?, OffsetDateTime::now_utc())
            .await?;
        info!(game_id = %id, "game created");
        Ok(record(stored, state))
    }

    pub async fn load(&self, id: Uuid) -> Result<GameRecord, DomainError> {
        let stored = self.require(id).await?;
        let state = restore_stored(&stored)?;
        Ok(record(stored, state))
    }

    /// Apply one event to the stored game and persist the result.
    pub async fn apply_event(
        &self,
        id: Uuid,
        event: GameEvent,
    ) -> Result<(GameRecord, Vec<GameTransition>), DomainError> {
        // Unknown ids never get a lock entry.
        self.require(id).await?;

        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().await;
            self.apply_locked(id, event).await
        };
        if matches!(result, Err(DomainError::NotFound(..))) {
            // Deleted while this request waited for the lock.
            self.release_lock(id, lock);
        }
        result
    }

    async fn apply_locked(
        &self,
        id: Uuid,
        event: GameEvent,
    ) -> Result<(GameRecord, Vec<GameTransition>), DomainError> {
        let current = self.load(id).await?;
        debug!(game_id = %id, event = ?event, "applying event");

        let (next, result) = apply(current.state, event);
        let transitions = result.inspect_err(|e| {
            debug!(game_id = %id, error = %e, "event rejected");
        })?;

        let stored = self
            .store
            .put(id, GameSnapshot::to_json(&next)?, OffsetDateTime::now_utc())
            .await?;
        info!(
            game_id = %id,
            transitions = transitions.len(),
            phase = ?next.phase(),
            "event applied"
        );
        Ok((record(stored, next), transitions))
    }

    /// Overwrite (or create) `id` with a client-supplied snapshot.
    ///
    /// The snapshot is validated by restoring it first; an invalid document
    /// leaves the store untouched.
    pub async fn save_snapshot(
        &self,
        id: Uuid,
        snapshot: GameSnapshot,
    ) -> Result<GameRecord, DomainError> {
        let state = snapshot.restore()?;

        let lock = self.lock_for(id);
        let _guard = lock.lock().await;
        let stored = self
            .store
            .put(id, GameSnapshot::to_json(&state)?, OffsetDateTime::now_utc())
            .await?;
        info!(game_id = %id, phase = ?state.phase(), "snapshot saved");
        Ok(record(stored, state))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let lock = self.lock_for(id);
        let removed = {
            let _guard = lock.lock().await;
            self.store.delete(id).await
        };
        self.release_lock(id, lock);
        let removed = removed?;

        if !removed {
            return Err(not_found(id));
        }
        info!(game_id = %id, "game deleted");
        Ok(())
    }

    /// Summaries of every stored game, oldest first. Games whose snapshot
    /// can no longer be read are skipped.
    pub async fn list(&self) -> Result<Vec<GameSummary>, DomainError> {
        let games = self.store.list().await?;
        let summaries = games
            .into_iter()
            .filter_map(|stored| match restore_stored(&stored) {
                Ok(state) => Some(GameSummary {
                    game_id: stored.id,
                    players: state.players().iter().map(|p| p.name.clone()).collect(),
                    phase: state.phase(),
                    created_at: stored.created_at,
                    updated_at: stored.updated_at,
                }),
                Err(e) => {
                    warn!(game_id = %stored.id, error = %e, "skipping unreadable game");
                    None
                }
            })
            .collect();
        Ok(summaries)
    }

    /// Remove games not updated within `ttl` of `now`.
    pub async fn sweep_stale(&self, ttl: Duration, now: OffsetDateTime) -> Result<usize, DomainError> {
        let removed = self.store.remove_stale(now - ttl).await?;
        for id in &removed {
            // Entries still held by a request are released by that request.
            self.locks.remove_if(id, |_, lock| Arc::strong_count(lock) == 1);
        }
        Ok(removed.len())
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.store.count().await
    }

    async fn require(&self, id: Uuid) -> Result<StoredGame, DomainError> {
        self.store.get(id).await?.ok_or_else(|| not_found(id))
    }

    fn lock_for(&self, id: Uuid) -> Arc<Mutex<()>> {
        self.locks.entry(id).or_default().value().clone()
    }

    /// Drop `id`'s lock entry once the caller has released the guard, unless
    /// another request still holds or waits on the same mutex.
    fn release_lock(&self, id: Uuid, lock: Arc<Mutex<()>>) {
        self.locks
            .remove_if(&id, |_, entry| Arc::ptr_eq(entry, &lock) && Arc::strong_count(entry) == 2);
    }
}

fn record(stored: StoredGame, state: GameState) -> GameRecord {
    GameRecord {
        id: stored.id,
        state,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }
}

/// Stored snapshots were validated on the way in; failing now means the
/// data itself is damaged.
fn restore_stored(stored: &StoredGame) -> Result<GameState, DomainError> {
    GameSnapshot::from_json(&stored.snapshot_json)
        .and_then(GameSnapshot::restore)
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("game {} snapshot unreadable: {e}", stored.id),
            )
        })
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found"))
}
