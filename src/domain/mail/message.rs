//! Outbound mail message.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl OutgoingMessage {
    /// A message must have a sender, at least one recipient and a subject.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.from.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::MailError, "message has no sender"));
        }
        if self.to.is_empty() {
            return Err(DomainError::new(
                ErrorCode::MailError,
                format!("no recipients for '{}'", self.subject),
            ));
        }
        if self.subject.trim().is_empty() {
            return Err(DomainError::new(ErrorCode::MailError, "message has no subject"));
        }
        Ok(())
    }
}
