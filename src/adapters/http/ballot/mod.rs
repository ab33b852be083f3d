//! HTTP adapter for ballot endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BallotResponse, BallotSummaryParams, CloseBallotRequest, EditPositionRequest,
    IssueBallotRequest, PositionResponse, SendPositionEmailRequest,
};
pub use handlers::BallotHandlers;
pub use routes::ballot_routes;
