//! In-memory charter text storage for tests and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::charter::charter_text_filename;
use crate::domain::document::Revision;
use crate::domain::foundation::DocName;
use crate::ports::{CharterTextStorage, StorageError};

/// Charter texts keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharterTextStorage {
    texts: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCharterTextStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.texts.read().await.len()
    }

    pub async fn clear(&self) {
        self.texts.write().await.clear();
    }
}

#[async_trait]
impl CharterTextStorage for InMemoryCharterTextStorage {
    async fn write(&self, name: &DocName, rev: Revision, text: &str) -> Result<(), StorageError> {
        self.texts
            .write()
            .await
            .insert(charter_text_filename(name, rev), text.to_string());
        Ok(())
    }

    async fn read(&self, name: &DocName, rev: Revision) -> Result<String, StorageError> {
        let path = charter_text_filename(name, rev);
        self.texts
            .read()
            .await
            .get(&path)
            .cloned()
            .ok_or(StorageError::NotFound { path })
    }

    async fn exists(&self, name: &DocName, rev: Revision) -> Result<bool, StorageError> {
        Ok(self
            .texts
            .read()
            .await
            .contains_key(&charter_text_filename(name, rev)))
    }
}
