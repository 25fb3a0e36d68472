//! Notifier implementations.

pub mod nats;
pub mod recording;

pub use nats::{ChangePayload, NatsClientPublisher, NatsNotifier, NatsPublisher, TestNats};
pub use recording::RecordingNotifier;
