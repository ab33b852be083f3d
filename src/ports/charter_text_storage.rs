//! Charter text storage port.
//!
//! Each charter revision's text is kept as a file named
//! `<charter-name>-<rev>.txt`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::document::Revision;
use crate::domain::foundation::{DocName, DomainError, ErrorCode};

/// Errors that can occur during charter text storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Text too large: {size_bytes} bytes (max: {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        StorageError::Io {
            message: message.into(),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => {
                DomainError::new(ErrorCode::CharterTextNotFound, err.to_string())
            }
            StorageError::TooLarge { .. } => DomainError::validation("text", err.to_string()),
            _ => DomainError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

#[async_trait]
pub trait CharterTextStorage: Send + Sync {
    /// Write the text of a charter revision, replacing any earlier copy.
    ///
    /// Writes are atomic: readers never see partial content.
    async fn write(&self, name: &DocName, rev: Revision, text: &str) -> Result<(), StorageError>;

    /// Read the text of a charter revision.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no text was stored.
    async fn read(&self, name: &DocName, rev: Revision) -> Result<String, StorageError>;

    async fn exists(&self, name: &DocName, rev: Revision) -> Result<bool, StorageError>;
}
