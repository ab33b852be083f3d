//! HTTP adapter for draft and document endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddCommentRequest, ChangeDraftStateRequest, DocumentChangeResponse, RegisterDraftRequest,
    SubmitRevisionRequest,
};
pub use handlers::DocumentHandlers;
pub(crate) use handlers::parse_doc_name;
pub use routes::document_routes;
