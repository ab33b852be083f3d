//! Mailer that writes messages to the log instead of delivering them.

use async_trait::async_trait;

use crate::domain::mail::OutgoingMessage;
use crate::ports::{MailError, Mailer};

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &OutgoingMessage) -> Result<(), MailError> {
        message
            .validate()
            .map_err(|e| MailError::InvalidMessage(e.message))?;
        tracing::info!(
            from = %message.from,
            to = %message.to.join(", "),
            cc = %message.cc.join(", "),
            subject = %message.subject,
            "Mail (not delivered)"
        );
        tracing::debug!(body = %message.body, "Mail body");
        Ok(())
    }
}
