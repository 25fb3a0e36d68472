//! Snapshot reconciliation.
//!
//! Compares the stored calendar against a freshly scraped one and reports
//! what changed, in the order of the scraped calendar. Races are matched by
//! title only. Races that disappeared from the calendar are not reported.

use std::collections::HashMap;

use crate::types::change::{ChangeEvent, ChangeKind};
use crate::types::race::RaceRecord;

/// Diff two snapshots into change events.
///
/// For every race in `new`:
/// - no race with the same title in `old` → one `NewRace` event
/// - otherwise one event per differing field, in the order date, time,
///   location, status (exact, case-sensitive comparison)
///
/// When `old` holds several races with the same title, the first one is used.
pub fn reconcile(old: &[RaceRecord], new: &[RaceRecord]) -> Vec<ChangeEvent> {
    let mut by_title: HashMap<&str, &RaceRecord> = HashMap::with_capacity(old.len());
    for race in old {
        by_title.entry(race.title.as_str()).or_insert(race);
    }

    let mut changes = Vec::new();
    for race in new {
        match by_title.get(race.title.as_str()) {
            None => changes.push(ChangeEvent::new_race(race)),
            Some(previous) => changes.extend(field_changes(previous, race)),
        }
    }
    changes
}

fn field_changes<'a>(
    previous: &'a RaceRecord,
    current: &'a RaceRecord,
) -> impl Iterator<Item = ChangeEvent> + 'a {
    ChangeKind::FIELD_CHANGES.into_iter().filter_map(move |kind| {
        let before = kind.field_value(previous)?;
        let after = kind.field_value(current)?;
        if before == after {
            return None;
        }
        ChangeEvent::field_changed(kind, &previous.title, before, after)
    })
}
