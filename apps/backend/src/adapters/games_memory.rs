//! In-process game store backed by `DashMap`.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::repos::games::{GameStore, StoredGame};

/// Games live only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: DashMap<Uuid, StoredGame>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn get(&self, id: Uuid) -> Result<Option<StoredGame>, DomainError> {
        Ok(self.games.get(&id).map(|entry| entry.value().clone()))
    }

    async fn put(
        &self,
        id: Uuid,
        snapshot_json: String,
        now: OffsetDateTime,
    ) -> Result<StoredGame, DomainError> {
        let stored = match self.games.entry(id) {
            Entry::Occupied(mut entry) => {
                let game = entry.get_mut();
                game.snapshot_json = snapshot_json;
                game.updated_at = now;
                game.clone()
            }
            Entry::Vacant(entry) => entry
                .insert(StoredGame {
                    id,
                    snapshot_json,
                    created_at: now,
                    updated_at: now,
                })
                .value()
                .clone(),
        };
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.games.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<StoredGame>, DomainError> {
        let mut games: Vec<StoredGame> = self
            .games
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        games.sort_by_key(|g| (g.created_at, g.id));
        Ok(games)
    }

    async fn remove_stale(&self, cutoff: OffsetDateTime) -> Result<Vec<Uuid>, DomainError> {
        let stale: Vec<Uuid> = self
            .games
            .iter()
            .filter(|entry| entry.value().updated_at < cutoff)
            .map(|entry| *entry.key())
            .collect();

        let mut removed = Vec::with_capacity(stale.len());
        for id in stale {
            // Re-check under the shard lock: the game may have been touched since.
            if self
                .games
                .remove_if(&id, |_, game| game.updated_at < cutoff)
                .is_some()
            {
                removed.push(id);
            }
        }
        debug!(removed = removed.len(), "stale games removed");
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.games.len())
    }
}
