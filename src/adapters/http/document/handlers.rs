//! HTTP handlers for document endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{bad_request, handle_document_error};
use crate::adapters::http::middleware::Actor;
use crate::application::handlers::document::{
    AddCommentCommand, AddCommentHandler, ChangeDraftStateCommand, ChangeDraftStateHandler,
    GetDocumentHandler, GetDocumentHistoryHandler, GetDocumentHistoryQuery, GetDocumentQuery,
    RegisterDraftCommand, RegisterDraftHandler, SubmitDraftRevisionCommand,
    SubmitDraftRevisionHandler,
};
use crate::domain::foundation::DocName;

use super::dto::{
    AddCommentRequest, ChangeDraftStateRequest, DocumentChangeResponse, RegisterDraftRequest,
    SubmitRevisionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DocumentHandlers {
    register_handler: Arc<RegisterDraftHandler>,
    revision_handler: Arc<SubmitDraftRevisionHandler>,
    state_handler: Arc<ChangeDraftStateHandler>,
    comment_handler: Arc<AddCommentHandler>,
    get_handler: Arc<GetDocumentHandler>,
    history_handler: Arc<GetDocumentHistoryHandler>,
}

impl DocumentHandlers {
    pub fn new(
        register_handler: Arc<RegisterDraftHandler>,
        revision_handler: Arc<SubmitDraftRevisionHandler>,
        state_handler: Arc<ChangeDraftStateHandler>,
        comment_handler: Arc<AddCommentHandler>,
        get_handler: Arc<GetDocumentHandler>,
        history_handler: Arc<GetDocumentHistoryHandler>,
    ) -> Self {
        Self {
            register_handler,
            revision_handler,
            state_handler,
            comment_handler,
            get_handler,
            history_handler,
        }
    }
}

/// Parses a document name from the path.
pub(crate) fn parse_doc_name(raw: &str) -> Result<DocName, Response> {
    raw.parse::<DocName>()
        .map_err(|e| bad_request(format!("Invalid document name: {}", e)))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/docs - Register a new draft
pub async fn register_draft(
    State(handlers): State<DocumentHandlers>,
    actor: Actor,
    Json(req): Json<RegisterDraftRequest>,
) -> Response {
    let cmd = RegisterDraftCommand {
        name: req.name,
        title: req.title,
        group: req.group,
        stream: req.stream,
        intended_std_level: req.intended_std_level,
        ad: req.ad,
        notify: req.notify,
    };

    match handlers.register_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(DocumentChangeResponse::from(result))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/docs/:name - Document with its open ballots
pub async fn get_document(
    State(handlers): State<DocumentHandlers>,
    Path(name): Path<String>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(GetDocumentQuery { name }).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/docs/:name/history - Event log and saved versions
pub async fn get_document_history(
    State(handlers): State<DocumentHandlers>,
    Path(name): Path<String>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };

    match handlers
        .history_handler
        .handle(GetDocumentHistoryQuery { name })
        .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/docs/:name/revisions - Submit the next draft revision
pub async fn submit_revision(
    State(handlers): State<DocumentHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<SubmitRevisionRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = SubmitDraftRevisionCommand {
        name,
        rev: req.rev,
        title: req.title,
    };

    match handlers.revision_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => (StatusCode::OK, Json(DocumentChangeResponse::from(result))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/docs/:name/state - Change a draft's IESG state
pub async fn change_draft_state(
    State(handlers): State<DocumentHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<ChangeDraftStateRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = ChangeDraftStateCommand {
        name,
        state: req.state,
        comment: req.comment,
    };

    match handlers.state_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => (StatusCode::OK, Json(DocumentChangeResponse::from(result))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/docs/:name/comments - Add a comment to the log
pub async fn add_comment(
    State(handlers): State<DocumentHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<AddCommentRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = AddCommentCommand {
        name,
        comment: req.comment,
    };

    match handlers.comment_handler.handle(cmd, actor.metadata()).await {
        Ok(event) => (StatusCode::CREATED, Json(event)).into_response(),
        Err(e) => handle_document_error(e),
    }
}
