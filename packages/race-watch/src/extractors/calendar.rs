//! HTTP extractor for the public race calendar.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::listing::parse_calendar;
use crate::error::{FetchError, FetchResult};
use crate::traits::extractor::RaceExtractor;
use crate::types::race::RaceRecord;

/// Yearly race index; the year is appended as a query parameter.
pub const DEFAULT_CALENDAR_BASE: &str = "https://www.nyrr.org/fullraceyearindex";

const USER_AGENT: &str = concat!("race-watch/", env!("CARGO_PKG_VERSION"));

/// Calendar URL for a given year.
pub fn calendar_url_for_year(year: i32) -> String {
    format!("{DEFAULT_CALENDAR_BASE}?year={year}")
}

/// Fetches the calendar page once per run and parses it.
///
/// Non-success responses are errors; nothing is retried.
pub struct CalendarExtractor {
    client: reqwest::Client,
    url: String,
}

impl CalendarExtractor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_html(&self) -> FetchResult<String> {
        debug!(url = %self.url, "Fetching race calendar");
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!(url = %self.url, error = %e, "HTTP request failed");
            FetchError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "Calendar returned non-success status");
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl RaceExtractor for CalendarExtractor {
    async fn fetch(&self) -> FetchResult<Vec<RaceRecord>> {
        let html = self.fetch_html().await?;
        let parsed = parse_calendar(&html);

        info!(
            url = %self.url,
            races = parsed.races.len(),
            skipped = parsed.skipped,
            duplicates = parsed.duplicates,
            "Scraped race calendar"
        );
        Ok(parsed.races)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_url_carries_year() {
        assert_eq!(
            calendar_url_for_year(2024),
            "https://www.nyrr.org/fullraceyearindex?year=2024"
        );
    }

    #[test]
    fn extractor_keeps_configured_url() {
        let extractor =
            CalendarExtractor::new("http://localhost/cal", Duration::from_secs(5)).unwrap();
        assert_eq!(extractor.url(), "http://localhost/cal");
    }
}
