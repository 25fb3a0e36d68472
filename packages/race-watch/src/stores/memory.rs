//! In-memory snapshot store for testing and dry runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::SnapshotStore;
use crate::types::race::{RaceId, RaceRecord};

/// Snapshot store backed by a map in memory.
///
/// Records every write so tests can assert on what was persisted. Data is
/// lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    races: RwLock<BTreeMap<RaceId, RaceRecord>>,
    replace_calls: RwLock<Vec<Vec<RaceRecord>>>,
    insert_missing_calls: RwLock<Vec<Vec<RaceRecord>>>,
    fail_loads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing snapshot (not recorded as a write).
    pub fn with_races(self, races: Vec<RaceRecord>) -> Self {
        {
            let mut stored = self.races.write().unwrap();
            for race in races {
                stored.insert(race.race_id.clone(), race);
            }
        }
        self
    }

    /// Make `load_all` fail.
    pub fn with_failing_loads(self) -> Self {
        self.fail_loads.store(true, Ordering::SeqCst);
        self
    }

    /// Make `replace_all` and `insert_missing` fail without touching data.
    pub fn with_failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Every snapshot passed to `replace_all`, in call order.
    pub fn replace_calls(&self) -> Vec<Vec<RaceRecord>> {
        self.replace_calls.read().unwrap().clone()
    }

    pub fn replace_call_count(&self) -> usize {
        self.replace_calls.read().unwrap().len()
    }

    pub fn insert_missing_call_count(&self) -> usize {
        self.insert_missing_calls.read().unwrap().len()
    }

    /// Current stored races, ordered by title.
    pub fn races(&self) -> Vec<RaceRecord> {
        let mut races: Vec<RaceRecord> = self.races.read().unwrap().values().cloned().collect();
        races.sort_by(|a, b| a.title.cmp(&b.title));
        races
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store rejects writes".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load_all(&self) -> StoreResult<Vec<RaceRecord>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store rejects reads".into()));
        }
        Ok(self.races())
    }

    async fn replace_all(&self, races: &[RaceRecord]) -> StoreResult<()> {
        self.replace_calls.write().unwrap().push(races.to_vec());
        self.check_writable()?;

        let replacement: BTreeMap<RaceId, RaceRecord> = races
            .iter()
            .map(|race| (race.race_id.clone(), race.clone()))
            .collect();
        *self.races.write().unwrap() = replacement;
        Ok(())
    }

    async fn insert_missing(&self, races: &[RaceRecord]) -> StoreResult<usize> {
        self.insert_missing_calls.write().unwrap().push(races.to_vec());
        self.check_writable()?;

        let mut stored = self.races.write().unwrap();
        let mut inserted = 0;
        for race in races {
            if !stored.contains_key(&race.race_id) {
                stored.insert(race.race_id.clone(), race.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
