use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::race::RaceRecord;

/// Produces the current calendar as an ordered list of races.
#[async_trait]
pub trait RaceExtractor: Send + Sync {
    /// Fetch and parse the calendar. Races are returned in page order.
    async fn fetch(&self) -> FetchResult<Vec<RaceRecord>>;
}
