//! Race records as listed on the calendar and as persisted in the snapshot store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable race identifier: MD5 (lowercase hex) of the race title.
///
/// Two records with the same title always share an id, so the id is the
/// primary key of the snapshot store.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RaceId(String);

impl RaceId {
    /// Derive the id from a race title.
    pub fn from_title(title: &str) -> Self {
        Self(format!("{:x}", md5::compute(title.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scheduled event on the race calendar.
///
/// All fields are display text exactly as the calendar shows them (trimmed).
/// Only `title` takes part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RaceRecord {
    pub race_id: RaceId,
    pub title: String,
    #[sqlx(rename = "race_date")]
    pub date: String,
    #[sqlx(rename = "race_time")]
    pub time: String,
    pub location: String,
    pub status: String,
}

impl RaceRecord {
    /// Build a record, deriving `race_id` from the title.
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            race_id: RaceId::from_title(&title),
            title,
            date: date.into(),
            time: time.into(),
            location: location.into(),
            status: status.into(),
        }
    }

    /// Return a copy with a different status (same identity).
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Return a copy with a different date (same identity).
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}
