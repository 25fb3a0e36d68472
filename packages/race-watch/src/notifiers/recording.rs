//! Notifier that records calls, for tests.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;

use crate::error::{NotifyError, NotifyResult};
use crate::traits::notifier::Notifier;

/// Records every `(subject, message)` it is asked to deliver.
///
/// Calls listed with [`RecordingNotifier::failing_on`] are recorded as
/// attempted and then rejected.
#[derive(Default)]
pub struct RecordingNotifier {
    attempts: RwLock<Vec<(String, String)>>,
    failing_calls: HashSet<usize>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the call with this zero-based index.
    pub fn failing_on(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    /// Every attempted notification, including rejected ones.
    pub fn attempts(&self) -> Vec<(String, String)> {
        self.attempts.read().unwrap().clone()
    }

    /// Notifications that were accepted.
    pub fn delivered(&self) -> Vec<(String, String)> {
        self.attempts
            .read()
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.failing_calls.contains(index))
            .map(|(_, sent)| sent.clone())
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.attempts.read().unwrap().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, subject: &str, message: &str) -> NotifyResult<()> {
        let call = {
            let mut attempts = self.attempts.write().unwrap();
            attempts.push((subject.to_string(), message.to_string()));
            attempts.len() - 1
        };

        if self.failing_calls.contains(&call) {
            return Err(NotifyError::Rejected(format!("call {call} configured to fail")));
        }
        Ok(())
    }
}
