//! One reconciliation pass.
//!
//! ```text
//! store.load_all() ──┐
//!                    ├─► reconcile(old, new) ─► changes?
//! extractor.fetch() ─┘                            │
//!                                   no ◄──────────┴──────► yes
//!                                   (store untouched)      persist new snapshot
//!                                                          notify each change
//! ```

use tracing::{error, info, warn};

use crate::config::PersistencePolicy;
use crate::error::RunError;
use crate::reconcile::reconcile;
use crate::traits::{extractor::RaceExtractor, notifier::Notifier, store::SnapshotStore};

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub stored_races: usize,
    pub scraped_races: usize,
    pub changes: usize,
    pub snapshot_written: bool,
    pub races_written: usize,
    pub notifications_sent: usize,
    pub notifications_failed: usize,
}

impl RunReport {
    pub fn has_changes(&self) -> bool {
        self.changes > 0
    }
}

/// Run one reconciliation pass.
///
/// The stored snapshot is only written when at least one change was
/// detected. A fetch or store failure aborts the run; a failed notification
/// is logged and the remaining ones are still sent.
pub async fn run<E, S, N>(
    extractor: &E,
    store: &S,
    notifier: &N,
    policy: PersistencePolicy,
) -> Result<RunReport, RunError>
where
    E: RaceExtractor + ?Sized,
    S: SnapshotStore + ?Sized,
    N: Notifier + ?Sized,
{
    let old = store.load_all().await.map_err(|e| {
        error!(error = %e, "Failed to load stored races");
        RunError::from(e)
    })?;

    let new = extractor.fetch().await.map_err(|e| {
        error!(error = %e, "Failed to scrape race calendar, store left untouched");
        RunError::from(e)
    })?;

    let changes = reconcile(&old, &new);

    let mut report = RunReport {
        stored_races: old.len(),
        scraped_races: new.len(),
        changes: changes.len(),
        ..RunReport::default()
    };

    if changes.is_empty() {
        info!(stored = old.len(), scraped = new.len(), "No changes to report");
        return Ok(report);
    }

    // Races written by this pass; insert-missing skips ids already stored.
    let persisted = match policy {
        PersistencePolicy::Replace => store.replace_all(&new).await.map(|()| new.len()),
        PersistencePolicy::InsertMissing => store.insert_missing(&new).await,
    };
    let written = match persisted {
        Ok(written) => written,
        Err(e) => {
            error!(error = %e, "Failed to persist snapshot, no notifications sent");
            return Err(e.into());
        }
    };
    report.races_written = written;
    report.snapshot_written = policy == PersistencePolicy::Replace || written > 0;
    if report.snapshot_written {
        info!(changes = changes.len(), written, %policy, "Snapshot persisted");
    } else {
        info!(changes = changes.len(), %policy, "No new races to store, snapshot unchanged");
    }

    for change in &changes {
        info!(subject = change.subject(), message = %change.message, "Race change");

        match notifier.notify(change.subject(), &change.message).await {
            Ok(()) => report.notifications_sent += 1,
            Err(e) => {
                warn!(subject = change.subject(), error = %e, "Notification failed, continuing");
                report.notifications_failed += 1;
            }
        }
    }

    Ok(report)
}
