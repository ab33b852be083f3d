//! HTTP handlers for chartering endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::document::parse_doc_name;
use crate::adapters::http::error::{bad_request, handle_document_error};
use crate::adapters::http::middleware::Actor;
use crate::application::handlers::charter::{
    ApproveCharterCommand, ApproveCharterHandler, ChangeCharterStateCommand,
    ChangeCharterStateHandler, ListMilestonesHandler, ListMilestonesQuery, StartCharteringCommand,
    StartCharteringHandler, SubmitCharterTextCommand, SubmitCharterTextHandler,
};
use crate::domain::foundation::GroupAcronym;

use super::dto::{
    ChangeCharterStateRequest, CharterChangeResponse, MilestoneParams, StartCharteringRequest,
    SubmitCharterTextRequest,
};

#[derive(Clone)]
pub struct CharterHandlers {
    start_handler: Arc<StartCharteringHandler>,
    state_handler: Arc<ChangeCharterStateHandler>,
    text_handler: Arc<SubmitCharterTextHandler>,
    approve_handler: Arc<ApproveCharterHandler>,
    milestones_handler: Arc<ListMilestonesHandler>,
}

impl CharterHandlers {
    pub fn new(
        start_handler: Arc<StartCharteringHandler>,
        state_handler: Arc<ChangeCharterStateHandler>,
        text_handler: Arc<SubmitCharterTextHandler>,
        approve_handler: Arc<ApproveCharterHandler>,
        milestones_handler: Arc<ListMilestonesHandler>,
    ) -> Self {
        Self {
            start_handler,
            state_handler,
            text_handler,
            approve_handler,
            milestones_handler,
        }
    }
}

fn parse_acronym(raw: &str) -> Result<GroupAcronym, Response> {
    raw.parse::<GroupAcronym>()
        .map_err(|e| bad_request(format!("Invalid group acronym: {}", e)))
}

/// POST /api/groups/:acronym/charter - Start (re)chartering a group
pub async fn start_chartering(
    State(handlers): State<CharterHandlers>,
    actor: Actor,
    Path(acronym): Path<String>,
    Json(req): Json<StartCharteringRequest>,
) -> Response {
    let group = match parse_acronym(&acronym) {
        Ok(group) => group,
        Err(response) => return response,
    };
    let cmd = StartCharteringCommand {
        group,
        target: req.target,
        without_external_review: req.without_external_review,
    };

    match handlers.start_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => {
            (StatusCode::OK, Json(CharterChangeResponse::from(result))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// GET /api/groups/:acronym/milestones - Milestones of a group
pub async fn list_milestones(
    State(handlers): State<CharterHandlers>,
    Path(acronym): Path<String>,
    Query(params): Query<MilestoneParams>,
) -> Response {
    let group = match parse_acronym(&acronym) {
        Ok(group) => group,
        Err(response) => return response,
    };
    let query = ListMilestonesQuery {
        group,
        include_deleted: params.include_deleted,
    };

    match handlers.milestones_handler.handle(query).await {
        Ok(milestones) => (StatusCode::OK, Json(milestones)).into_response(),
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/charters/:name/state - Move a charter through review
pub async fn change_charter_state(
    State(handlers): State<CharterHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<ChangeCharterStateRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = ChangeCharterStateCommand {
        name,
        target: req.target,
        without_external_review: req.without_external_review,
        comment: req.comment,
    };

    match handlers.state_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => {
            (StatusCode::OK, Json(CharterChangeResponse::from(result))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/charters/:name/text - Submit new charter text
pub async fn submit_charter_text(
    State(handlers): State<CharterHandlers>,
    actor: Actor,
    Path(name): Path<String>,
    Json(req): Json<SubmitCharterTextRequest>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };
    let cmd = SubmitCharterTextCommand {
        name,
        text: req.text,
    };

    match handlers.text_handler.handle(cmd, actor.metadata()).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(CharterChangeResponse::from(result))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}

/// POST /api/charters/:name/approve - Approve a charter in IESG review
pub async fn approve_charter(
    State(handlers): State<CharterHandlers>,
    actor: Actor,
    Path(name): Path<String>,
) -> Response {
    let name = match parse_doc_name(&name) {
        Ok(name) => name,
        Err(response) => return response,
    };

    match handlers
        .approve_handler
        .handle(ApproveCharterCommand { name }, actor.metadata())
        .await
    {
        Ok(result) => {
            (StatusCode::OK, Json(CharterChangeResponse::from(result))).into_response()
        }
        Err(e) => handle_document_error(e),
    }
}
