//! Errors returned by document, ballot and charter command handlers.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Application-facing error for document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid revision: {0}")]
    InvalidRevision(String),

    #[error("Wrong document type: {0}")]
    WrongType(String),

    #[error("Ballot closed: {0}")]
    BallotClosed(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl DocumentError {
    pub fn not_found(what: impl Into<String>) -> Self {
        DocumentError::NotFound(what.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DocumentError::Forbidden(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        DocumentError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        DocumentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::NotFound(_) => ErrorCode::DocumentNotFound,
            DocumentError::AlreadyExists(_) => ErrorCode::AlreadyExists,
            DocumentError::Forbidden(_) => ErrorCode::Forbidden,
            DocumentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            DocumentError::InvalidRevision(_) => ErrorCode::InvalidRevision,
            DocumentError::WrongType(_) => ErrorCode::WrongDocumentType,
            DocumentError::BallotClosed(_) => ErrorCode::BallotClosed,
            DocumentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DocumentError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for DocumentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DocumentNotFound
            | ErrorCode::GroupNotFound
            | ErrorCode::PersonNotFound
            | ErrorCode::BallotNotFound
            | ErrorCode::CharterTextNotFound => DocumentError::NotFound(err.message),
            ErrorCode::AlreadyExists => DocumentError::AlreadyExists(err.message),
            ErrorCode::Forbidden | ErrorCode::Unauthorized => DocumentError::Forbidden(err.message),
            ErrorCode::InvalidStateTransition => DocumentError::InvalidState(err.message),
            ErrorCode::InvalidRevision => DocumentError::InvalidRevision(err.message),
            ErrorCode::WrongDocumentType => DocumentError::WrongType(err.message),
            ErrorCode::BallotClosed => DocumentError::BallotClosed(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => DocumentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::DatabaseError
            | ErrorCode::StorageError
            | ErrorCode::MailError
            | ErrorCode::InternalError => DocumentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for DocumentError {
    fn from(err: ValidationError) -> Self {
        DocumentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
