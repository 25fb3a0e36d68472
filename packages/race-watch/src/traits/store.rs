use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::race::RaceRecord;

/// Persistent snapshot of the calendar, keyed by `RaceId`.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load every stored race.
    async fn load_all(&self) -> StoreResult<Vec<RaceRecord>>;

    /// Discard the stored snapshot and store `races` in its place.
    async fn replace_all(&self, races: &[RaceRecord]) -> StoreResult<()>;

    /// Store only the races whose id is not stored yet. Existing races are
    /// left untouched. Returns how many were inserted.
    async fn insert_missing(&self, races: &[RaceRecord]) -> StoreResult<usize>;
}
