//! Mock extractor for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{FetchError, FetchResult};
use crate::traits::extractor::RaceExtractor;
use crate::types::race::RaceRecord;

/// Returns a canned calendar, or a canned HTTP failure.
#[derive(Default)]
pub struct MockExtractor {
    races: Vec<RaceRecord>,
    failure_status: Option<u16>,
    fetch_calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar returned by every fetch.
    pub fn with_races(mut self, races: Vec<RaceRecord>) -> Self {
        self.races = races;
        self
    }

    /// Make every fetch fail as if the server answered with `status`.
    pub fn failing(mut self, status: u16) -> Self {
        self.failure_status = Some(status);
        self
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RaceExtractor for MockExtractor {
    async fn fetch(&self) -> FetchResult<Vec<RaceRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failure_status {
            return Err(FetchError::Status {
                url: "mock://calendar".to_string(),
                status,
            });
        }
        Ok(self.races.clone())
    }
}
