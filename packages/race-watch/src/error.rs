//! Typed errors for each collaborator of a reconciliation run.

use thiserror::Error;

/// The calendar page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Transport-level failure (DNS, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The snapshot store could not be read or written.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A notification could not be delivered.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to connect to NATS: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to publish to {topic}: {source}")]
    Publish {
        topic: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Missing or malformed environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Failure of a whole reconciliation run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("calendar fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("snapshot store failed: {0}")]
    Store(#[from] StoreError),
}

impl RunError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Fetch(_) => 2,
            RunError::Store(_) => 3,
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;
