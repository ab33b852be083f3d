//! Error responses shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::document::DocumentError;

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

/// Maps a handler error onto an HTTP status and body.
pub fn handle_document_error(error: DocumentError) -> Response {
    let status = match &error {
        DocumentError::NotFound(_) => StatusCode::NOT_FOUND,
        DocumentError::AlreadyExists(_) => StatusCode::CONFLICT,
        DocumentError::Forbidden(_) => StatusCode::FORBIDDEN,
        DocumentError::InvalidState(_) | DocumentError::BallotClosed(_) => StatusCode::CONFLICT,
        DocumentError::InvalidRevision(_)
        | DocumentError::WrongType(_)
        | DocumentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        DocumentError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let mut body = ErrorResponse::new(error.code().to_string(), error.to_string());
    if let DocumentError::ValidationFailed { field, .. } = &error {
        body.field = Some(field.clone());
    }
    (status, Json(body)).into_response()
}

/// Rejects a request whose path or body could not be parsed.
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_document_error(DocumentError::not_found("draft-foo"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let response = handle_document_error(DocumentError::invalid_state("pub is terminal"));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = handle_document_error(DocumentError::forbidden("not an IESG balloter"));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_failure_maps_to_400() {
        let response = handle_document_error(DocumentError::ValidationFailed {
            field: "discuss".to_string(),
            message: "required".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_document_error(DocumentError::Infrastructure("db down".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
