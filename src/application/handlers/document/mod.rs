//! Document handlers: drafts, comments and document queries.

mod add_comment;
mod change_draft_state;
mod get_document;
mod get_document_history;
mod register_draft;
mod submit_draft_revision;

pub use add_comment::{AddCommentCommand, AddCommentHandler};
pub use change_draft_state::{
    ChangeDraftStateCommand, ChangeDraftStateHandler, ChangeDraftStateResult,
};
pub use get_document::{DocumentView, GetDocumentHandler, GetDocumentQuery};
pub use get_document_history::{
    DocumentHistoryView, GetDocumentHistoryHandler, GetDocumentHistoryQuery,
};
pub use register_draft::{RegisterDraftCommand, RegisterDraftHandler, RegisterDraftResult};
pub use submit_draft_revision::{
    SubmitDraftRevisionCommand, SubmitDraftRevisionHandler, SubmitDraftRevisionResult,
};
