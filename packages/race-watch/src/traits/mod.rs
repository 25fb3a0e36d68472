//! Seams between the reconciliation run and its I/O collaborators.

pub mod extractor;
pub mod notifier;
pub mod store;
