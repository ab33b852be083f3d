//! HTTP routes for document endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_comment, change_draft_state, get_document, get_document_history, register_draft,
    submit_revision, DocumentHandlers,
};

/// Creates the document router, nested under `/api`.
pub fn document_routes(handlers: DocumentHandlers) -> Router {
    Router::new()
        .route("/docs", post(register_draft))
        .route("/docs/:name", get(get_document))
        .route("/docs/:name/history", get(get_document_history))
        .route("/docs/:name/revisions", post(submit_revision))
        .route("/docs/:name/state", post(change_draft_state))
        .route("/docs/:name/comments", post(add_comment))
        .with_state(handlers)
}
