//! Document repository port.
//!
//! Persists Document aggregates and the history snapshots taken before
//! each update.

use async_trait::async_trait;

use crate::domain::document::{DocHistory, Document};
use crate::domain::foundation::{DocName, DomainError};

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Save a new document.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if a document with the same name exists
    /// - `DatabaseError` on persistence failure
    async fn save(&self, doc: &Document) -> Result<(), DomainError>;

    /// Update an existing document, recording a history snapshot of the
    /// stored version first.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, doc: &Document) -> Result<(), DomainError>;

    /// Find a document by name. Returns `None` if not found.
    async fn find_by_name(&self, name: &DocName) -> Result<Option<Document>, DomainError>;

    async fn exists(&self, name: &DocName) -> Result<bool, DomainError>;

    /// Snapshots of earlier versions, oldest first.
    async fn history(&self, name: &DocName) -> Result<Vec<DocHistory>, DomainError>;
}
