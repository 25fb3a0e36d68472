use chrono::{Datelike, Utc};
use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretBox};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::extractors::calendar_url_for_year;

pub const DEFAULT_NOTIFY_SUBJECT: &str = "races.changes";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// How a changed calendar is written back to the snapshot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistencePolicy {
    /// Replace the whole stored snapshot with the scraped one.
    #[default]
    Replace,
    /// Only add races whose id is not stored yet. Changed races keep their
    /// old values, so the same change is reported again on the next run.
    InsertMissing,
}

impl FromStr for PersistencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" | "full-replace" => Ok(Self::Replace),
            "insert-missing" => Ok(Self::InsertMissing),
            other => Err(format!(
                "unknown policy '{other}', expected 'replace' or 'insert-missing'"
            )),
        }
    }
}

impl fmt::Display for PersistencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => f.write_str("replace"),
            Self::InsertMissing => f.write_str("insert-missing"),
        }
    }
}

/// A credential that never shows up in logs or debug output.
pub struct Secret(SecretBox<str>);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Run configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub database_url: Secret,
    pub nats_url: String,
    pub nats_token: Option<Secret>,
    pub notify_subject: String,
    pub calendar_url: String,
    pub http_timeout: Duration,
    pub persistence_policy: PersistencePolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let nats_url = get("NATS_URL").ok_or(ConfigError::Missing("NATS_URL"))?;

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let persistence_policy = match get("SNAPSHOT_POLICY") {
            Some(raw) => raw.parse::<PersistencePolicy>().map_err(|reason| ConfigError::Invalid {
                name: "SNAPSHOT_POLICY",
                reason,
            })?,
            None => PersistencePolicy::default(),
        };

        Ok(Self {
            database_url: Secret::new(database_url),
            nats_url,
            nats_token: get("NATS_TOKEN").map(Secret::new),
            notify_subject: get("NOTIFY_SUBJECT")
                .unwrap_or_else(|| DEFAULT_NOTIFY_SUBJECT.to_string()),
            calendar_url: get("CALENDAR_URL")
                .unwrap_or_else(|| calendar_url_for_year(Utc::now().year())),
            http_timeout: Duration::from_secs(http_timeout),
            persistence_policy,
        })
    }
}
