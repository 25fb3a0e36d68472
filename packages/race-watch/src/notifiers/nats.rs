//! NATS fan-out notifier.
//!
//! Every change is published as one JSON message on a single configured
//! subject; subscribers fan it out to email, SMS, chat and so on.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tracing::debug;

use crate::error::{NotifyError, NotifyResult};
use crate::traits::notifier::Notifier;

/// Wire payload published for each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePayload {
    pub subject: String,
    pub message: String,
}

/// Publish operation, split out so tests can run without a NATS server.
#[async_trait]
pub trait NatsPublisher: Send + Sync {
    async fn publish(&self, topic: String, payload: Bytes) -> NotifyResult<()>;
}

/// Real NATS client publisher.
///
/// Flushes after each publish: the process exits right after the run, and
/// unflushed messages would be lost.
pub struct NatsClientPublisher {
    client: async_nats::Client,
}

impl NatsClientPublisher {
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }

    /// Connect to `url`, authenticating with `token` when given.
    pub async fn connect(url: &str, token: Option<&str>) -> NotifyResult<Self> {
        let mut options = async_nats::ConnectOptions::new().name("race-watch");
        if let Some(token) = token {
            options = options.token(token.to_string());
        }

        let client = options
            .connect(url)
            .await
            .map_err(|e| NotifyError::Connect(Box::new(e)))?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl NatsPublisher for NatsClientPublisher {
    async fn publish(&self, topic: String, payload: Bytes) -> NotifyResult<()> {
        self.client
            .publish(topic.clone(), payload)
            .await
            .map_err(|e| NotifyError::Publish {
                topic: topic.clone(),
                source: Box::new(e),
            })?;

        self.client.flush().await.map_err(|e| NotifyError::Publish {
            topic,
            source: Box::new(e),
        })
    }
}

/// Notifier publishing every change to one NATS subject.
pub struct NatsNotifier<P: NatsPublisher> {
    publisher: P,
    topic: String,
}

impl<P: NatsPublisher> NatsNotifier<P> {
    pub fn new(publisher: P, topic: impl Into<String>) -> Self {
        Self {
            publisher,
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

#[async_trait]
impl<P: NatsPublisher> Notifier for NatsNotifier<P> {
    async fn notify(&self, subject: &str, message: &str) -> NotifyResult<()> {
        let payload = serde_json::to_vec(&ChangePayload {
            subject: subject.to_string(),
            message: message.to_string(),
        })?;

        self.publisher
            .publish(self.topic.clone(), Bytes::from(payload))
            .await?;
        debug!(topic = %self.topic, subject, "Published change notification");
        Ok(())
    }
}

/// A message captured by [`TestNats`].
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Bytes,
}

impl PublishedMessage {
    /// Decode the payload as a change notification.
    pub fn change(&self) -> serde_json::Result<ChangePayload> {
        serde_json::from_slice(&self.payload)
    }
}

/// In-memory publisher that records what would have been sent to NATS.
#[derive(Default)]
pub struct TestNats {
    published: RwLock<Vec<PublishedMessage>>,
}

impl TestNats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published_messages(&self) -> Vec<PublishedMessage> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn publish_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl NatsPublisher for TestNats {
    async fn publish(&self, topic: String, payload: Bytes) -> NotifyResult<()> {
        self.published
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(PublishedMessage { topic, payload });
        Ok(())
    }
}
