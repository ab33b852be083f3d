//! HTTP routes for chartering endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    approve_charter, change_charter_state, list_milestones, start_chartering,
    submit_charter_text, CharterHandlers,
};

/// Creates the chartering router, nested under `/api`.
pub fn charter_routes(handlers: CharterHandlers) -> Router {
    Router::new()
        .route("/groups/:acronym/charter", post(start_chartering))
        .route("/groups/:acronym/milestones", get(list_milestones))
        .route("/charters/:name/state", post(change_charter_state))
        .route("/charters/:name/text", post(submit_charter_text))
        .route("/charters/:name/approve", post(approve_charter))
        .with_state(handlers)
}
