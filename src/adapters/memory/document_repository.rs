//! In-memory document repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::{DocHistory, Document};
use crate::domain::foundation::{DocName, DomainError, ErrorCode};
use crate::ports::DocumentRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    docs: Arc<RwLock<HashMap<DocName, Document>>>,
    history: Arc<RwLock<HashMap<DocName, Vec<DocHistory>>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.docs.read().await.len()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, doc: &Document) -> Result<(), DomainError> {
        let mut docs = self.docs.write().await;
        if docs.contains_key(doc.name()) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Document already exists: {}", doc.name()),
            ));
        }
        docs.insert(doc.name().clone(), doc.clone());
        Ok(())
    }

    async fn update(&self, doc: &Document) -> Result<(), DomainError> {
        let mut docs = self.docs.write().await;
        let previous = docs.get(doc.name()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", doc.name()),
            )
        })?;
        self.history
            .write()
            .await
            .entry(doc.name().clone())
            .or_default()
            .push(DocHistory::snapshot(previous));
        docs.insert(doc.name().clone(), doc.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &DocName) -> Result<Option<Document>, DomainError> {
        Ok(self.docs.read().await.get(name).cloned())
    }

    async fn exists(&self, name: &DocName) -> Result<bool, DomainError> {
        Ok(self.docs.read().await.contains_key(name))
    }

    async fn history(&self, name: &DocName) -> Result<Vec<DocHistory>, DomainError> {
        Ok(self
            .history
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{IesgState, NewDraft, Stream};

    fn draft() -> Document {
        Document::new_draft(NewDraft {
            name: DocName::new("draft-foo").unwrap(),
            title: "Foo".to_string(),
            group: None,
            stream: Stream::Ietf,
            intended_std_level: None,
            ad: None,
            notify: vec![],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn save_rejects_duplicates() {
        let repo = InMemoryDocumentRepository::new();
        repo.save(&draft()).await.unwrap();
        let err = repo.save(&draft()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn update_snapshots_the_previous_version() {
        let repo = InMemoryDocumentRepository::new();
        let mut doc = draft();
        repo.save(&doc).await.unwrap();

        doc.set_iesg_state(IesgState::PubReq).unwrap();
        repo.update(&doc).await.unwrap();

        let history = repo.history(doc.name()).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].document().iesg_state(), Some(IesgState::IdExists));
        let stored = repo.find_by_name(doc.name()).await.unwrap().unwrap();
        assert_eq!(stored.iesg_state(), Some(IesgState::PubReq));
    }

    #[tokio::test]
    async fn update_of_unknown_document_fails() {
        let repo = InMemoryDocumentRepository::new();
        let err = repo.update(&draft()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DocumentNotFound);
    }
}
