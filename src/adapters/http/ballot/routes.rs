//! HTTP routes for ballot endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    ballot_summary, close_ballot, edit_position, issue_ballot, send_position_email,
    BallotHandlers,
};

/// Creates the ballot router, nested under `/api`.
pub fn ballot_routes(handlers: BallotHandlers) -> Router {
    Router::new()
        .route("/docs/:name/ballots", post(issue_ballot))
        .route("/docs/:name/ballots/close", post(close_ballot))
        .route("/docs/:name/ballot", get(ballot_summary))
        .route("/docs/:name/position", post(edit_position))
        .route("/docs/:name/position/email", post(send_position_email))
        .with_state(handlers)
}
