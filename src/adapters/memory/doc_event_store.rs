//! In-memory DocEvent store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::doc_event::{DocEvent, NewDocEvent};
use crate::domain::foundation::{DocEventId, DocName, DomainError};
use crate::ports::DocEventStore;

/// Keeps every event in insertion order and hands out sequential ids.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocEventStore {
    events: Arc<RwLock<Vec<DocEvent>>>,
}

impl InMemoryDocEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored event, across documents.
    pub async fn all(&self) -> Vec<DocEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl DocEventStore for InMemoryDocEventStore {
    async fn append(&self, event: NewDocEvent) -> Result<DocEvent, DomainError> {
        let mut events = self.events.write().await;
        let id = DocEventId::from_raw(events.len() as i64 + 1);
        let stored = event.into_event(id);
        events.push(stored.clone());
        Ok(stored)
    }

    async fn events_for(&self, doc: &DocName) -> Result<Vec<DocEvent>, DomainError> {
        let mut events: Vec<DocEvent> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.doc == *doc)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));
        Ok(events)
    }
}
