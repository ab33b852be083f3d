//! HTTP handlers for ballot endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::document::parse_doc_name;
use crate::adapters::http::error::handle_document_error;
use crate::adapters::http::middleware::Actor;
use crate::application::handlers::ballot::{
    BallotSummaryHandler, BallotSummaryQuery, CloseBallotCommand, CloseBallotHandler,
    EditPositionCommand, EditPositionHandler, IssueBallotCommand, IssueBallotHandler,
    SendPositionEmailCommand, SendPositionEmailHandler,
};

use super::dto::{
    BallotResponse, BallotSummaryParams, CloseBallotRequest, EditPositionRequest,
    IssueBallotRequest, PositionResponse, SendPositionEmailRequest,
};

#[derive(Clone)]
pub struct BallotHandlers {
    issue_handler: Arc<IssueBallotHandler>,
    close_handler: Arc<CloseBallotHandler>,
    position_handler: Arc<EditPositionHandler>,
    email_handler: Arc<SendPositionEmailHandler>,
    summary_handler: Arc<BallotSummaryHandler>,
}

impl BallotHandlers {
    pub fn new(
        issue_handler: Arc<IssueBallotHandler>,
        close_handler: Arc<CloseBallotHandler>,
        position_handler: Arc<EditPositionHandler>,
        email_handler: Arc<SendPositionEmailHandler>,
        summary_handler: Arc<BallotSummaryHandler>,
    ) -> Self {
        Self {
            issue_handler,
            close_handler,
            position_handler,
            email_handler,
            summary_handler,
        }
    }
}

/// POST /api/docs/:name/ballots - Issue a ballot
pub async fn issue_ballot(
    State(handlers): State<BallotHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<IssueBallotRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = IssueBallotCommand {
        name,
        ballot_type: req.ballot_type,
        auto_yes: req.auto_yes,
    };

    match handlers.issue_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => (StatusCode::CREATED, Json(BallotResponse::from(result))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/docs/:name/ballots/close - Close an open ballot
pub async fn close_ballot(
    State(handlers): State<BallotHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<CloseBallotRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = CloseBallotCommand {
        name,
        ballot_type: req.ballot_type,
    };

    match handlers.close_handler.handle(cmd, actor.metadata()).await {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/docs/:name/ballot - Positions and outcome of a ballot
pub async fn ballot_summary(
    State(handlers): State<BallotHandlers>,
    Path(name): Path<String>,
    Query(params): Query<BallotSummaryParams>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let query = BallotSummaryQuery {
        name,
        ballot_id: params.ballot_id,
    };

    match handlers.summary_handler.handle(query).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/docs/:name/position - Record a ballot position
pub async fn edit_position(
    State(handlers): State<BallotHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<EditPositionRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = EditPositionCommand {
        name,
        ballot_id: req.ballot_id,
        balloter: req.balloter.unwrap_or(actor.person),
        pos: req.position,
        discuss: req.discuss,
        comment: req.comment,
    };

    match handlers.position_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => (StatusCode::OK, Json(PositionResponse::from(result))).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/docs/:name/position/email - Mail a position to the voting body
pub async fn send_position_email(
    State(handlers): State<BallotHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<SendPositionEmailRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = SendPositionEmailCommand {
        name,
        ballot_id: req.ballot_id,
        balloter: req.balloter.unwrap_or(actor.person),
        extra_cc: req.extra_cc,
    };

    match handlers.email_handler.handle(cmd).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(e) => handle_document_error(e),
    }
}
