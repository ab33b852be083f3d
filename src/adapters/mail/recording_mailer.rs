//! Mailer that keeps every message in memory.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::mail::OutgoingMessage;
use crate::ports::{MailError, Mailer};

/// Records sent messages so tests can inspect the outbox.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    outbox: Arc<RwLock<Vec<OutgoingMessage>>>,
    fail_with: Arc<RwLock<Option<String>>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<OutgoingMessage> {
        self.outbox.read().await.clone()
    }

    /// Messages whose subject contains `needle`.
    pub async fn sent_matching(&self, needle: &str) -> Vec<OutgoingMessage> {
        self.outbox
            .read()
            .await
            .iter()
            .filter(|m| m.subject.contains(needle))
            .cloned()
            .collect()
    }

    pub async fn clear(&self) {
        self.outbox.write().await.clear();
    }

    /// Makes every subsequent send fail with a transport error.
    pub async fn fail_with(&self, reason: impl Into<String>) {
        *self.fail_with.write().await = Some(reason.into());
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), MailError> {
        if let Some(reason) = self.fail_with.read().await.clone() {
            return Err(MailError::Transport(reason));
        }
        message
            .validate()
            .map_err(|e| MailError::InvalidMessage(e.message))?;
        self.outbox.write().await.push(message.clone());
        Ok(())
    }
}
