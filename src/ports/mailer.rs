//! Mailer port - outbound mail transport.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::mail::OutgoingMessage;

/// Errors from a mail transport.
#[derive(Debug, Clone, Error)]
pub enum MailError {
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Rejected by provider ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        DomainError::new(ErrorCode::MailError, err.to_string())
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a message. Returns once the transport accepted it.
    async fn send(&self, message: &OutgoingMessage) -> Result<(), MailError>;
}
