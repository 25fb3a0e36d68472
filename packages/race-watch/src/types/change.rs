//! Change events produced by reconciling two snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::race::RaceRecord;

/// Category of a detected change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    NewRace,
    DateChange,
    TimeChange,
    LocationChange,
    StatusChange,
}

impl ChangeKind {
    /// Field comparisons in the order they are checked for a matched race.
    pub const FIELD_CHANGES: [ChangeKind; 4] = [
        ChangeKind::DateChange,
        ChangeKind::TimeChange,
        ChangeKind::LocationChange,
        ChangeKind::StatusChange,
    ];

    /// Notification subject for this kind.
    pub fn subject(&self) -> &'static str {
        match self {
            ChangeKind::NewRace => "New Race",
            ChangeKind::DateChange => "Date Change",
            ChangeKind::TimeChange => "Time Change",
            ChangeKind::LocationChange => "Location Change",
            ChangeKind::StatusChange => "Status Change",
        }
    }

    /// Label used in the message of a field change. `None` for `NewRace`.
    pub fn field_label(&self) -> Option<&'static str> {
        match self {
            ChangeKind::NewRace => None,
            ChangeKind::DateChange => Some("Date"),
            ChangeKind::TimeChange => Some("Time"),
            ChangeKind::LocationChange => Some("Location"),
            ChangeKind::StatusChange => Some("Status"),
        }
    }

    /// The race field this kind compares. `None` for `NewRace`.
    pub fn field_value<'a>(&self, race: &'a RaceRecord) -> Option<&'a str> {
        match self {
            ChangeKind::NewRace => None,
            ChangeKind::DateChange => Some(&race.date),
            ChangeKind::TimeChange => Some(&race.time),
            ChangeKind::LocationChange => Some(&race.location),
            ChangeKind::StatusChange => Some(&race.status),
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subject())
    }
}

/// One detected difference between the stored and the scraped calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub message: String,
}

impl ChangeEvent {
    /// A race that was not in the previous snapshot.
    pub fn new_race(race: &RaceRecord) -> Self {
        Self {
            kind: ChangeKind::NewRace,
            message: format!(
                "New Race: {} on {} at {} in {} [{}]",
                race.title, race.date, race.time, race.location, race.status
            ),
        }
    }

    /// A single field of a known race changed.
    ///
    /// Returns `None` when `kind` is not a field change.
    pub fn field_changed(kind: ChangeKind, title: &str, before: &str, after: &str) -> Option<Self> {
        let label = kind.field_label()?;
        Some(Self {
            kind,
            message: format!("{title}: {label} changed from {before} to {after}"),
        })
    }

    pub fn subject(&self) -> &'static str {
        self.kind.subject()
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.subject(), self.message)
    }
}
