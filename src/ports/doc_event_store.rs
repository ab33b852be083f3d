//! DocEvent store port.
//!
//! The store is append-only: events are never updated or removed. It
//! assigns ids in insertion order.

use async_trait::async_trait;

use crate::domain::doc_event::{DocEvent, DocEventLog, NewDocEvent};
use crate::domain::foundation::{DocName, DomainError};

#[async_trait]
pub trait DocEventStore: Send + Sync {
    /// Append an event, returning it with its assigned id.
    async fn append(&self, event: NewDocEvent) -> Result<DocEvent, DomainError>;

    /// All events of a document, ordered by `(time, id)`.
    async fn events_for(&self, doc: &DocName) -> Result<Vec<DocEvent>, DomainError>;

    /// The document's events as a queryable log.
    async fn log_for(&self, doc: &DocName) -> Result<DocEventLog, DomainError> {
        Ok(DocEventLog::new(doc.clone(), self.events_for(doc).await?))
    }
}
