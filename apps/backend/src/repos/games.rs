//! Game persistence trait and record type.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::DomainError;

/// A persisted game: the snapshot JSON exactly as produced by
/// `GameSnapshot::to_json`, plus bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGame {
    pub id: Uuid,
    pub snapshot_json: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Storage capability injected into the service layer.
///
/// Implementations must be safe to share across request handlers; callers
/// serialize writes to the same id themselves.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<StoredGame>, DomainError>;

    /// Insert or replace the snapshot for `id`. `created_at` is kept on
    /// replace; `updated_at` is always set to `now`.
    async fn put(
        &self,
        id: Uuid,
        snapshot_json: String,
        now: OffsetDateTime,
    ) -> Result<StoredGame, DomainError>;

    /// Returns whether a game was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// All stored games, oldest first.
    async fn list(&self) -> Result<Vec<StoredGame>, DomainError>;

    /// Remove games not updated since `cutoff`; returns the ids removed.
    async fn remove_stale(&self, cutoff: OffsetDateTime) -> Result<Vec<Uuid>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
