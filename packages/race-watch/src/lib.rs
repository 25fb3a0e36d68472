//! Race calendar watcher.
//!
//! Scrapes the public race calendar, diffs it against the snapshot stored by
//! the previous run, writes the new snapshot back when something changed and
//! publishes one notification per change.
//!
//! # Modules
//!
//! - [`reconcile`] - Pure snapshot diffing
//! - [`run`] - One reconciliation pass over the collaborators
//! - [`traits`] - Extractor, store and notifier seams
//! - [`extractors`] - HTTP calendar scraper and a mock
//! - [`stores`] - PostgreSQL and in-memory snapshot stores
//! - [`notifiers`] - NATS publisher and a recording notifier
//! - [`config`] - Environment configuration

pub mod config;
pub mod error;
pub mod extractors;
pub mod notifiers;
pub mod reconcile;
pub mod run;
pub mod stores;
pub mod traits;
pub mod types;

pub use config::{Config, PersistencePolicy};
pub use error::{ConfigError, FetchError, NotifyError, RunError, StoreError};
pub use extractors::{parse_calendar, CalendarExtractor, MockExtractor, ParsedCalendar};
pub use notifiers::{NatsClientPublisher, NatsNotifier, RecordingNotifier, TestNats};
pub use reconcile::reconcile;
pub use run::{run, RunReport};
pub use stores::{MemoryStore, PostgresStore};
pub use traits::{extractor::RaceExtractor, notifier::Notifier, store::SnapshotStore};
pub use types::{
    change::{ChangeEvent, ChangeKind},
    race::{RaceId, RaceRecord},
};
