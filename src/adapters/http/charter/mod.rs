//! HTTP adapter for chartering endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangeCharterStateRequest, CharterChangeResponse, MilestoneParams, StartCharteringRequest,
    SubmitCharterTextRequest,
};
pub use handlers::CharterHandlers;
pub use routes::charter_routes;
