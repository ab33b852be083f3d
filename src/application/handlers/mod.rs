//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! command handler takes the document lock, appends DocEvents through the
//! recorder and publishes them once the change is stored.

pub mod ballot;
pub mod charter;
pub mod document;

pub use ballot::{
    BallotSummary, BallotSummaryHandler, BallotSummaryQuery, BalloterPosition, CloseBallotCommand,
    CloseBallotHandler, EditPositionCommand, EditPositionHandler, EditPositionResult,
    IssueBallotCommand, IssueBallotHandler, IssueBallotResult, SendPositionEmailCommand,
    SendPositionEmailHandler,
};
pub use charter::{
    ApproveCharterCommand, ApproveCharterHandler, ApproveCharterResult, ChangeCharterStateCommand,
    ChangeCharterStateHandler, ChangeCharterStateResult, ListMilestonesHandler,
    ListMilestonesQuery, StartCharteringCommand, StartCharteringHandler, StartCharteringResult,
    SubmitCharterTextCommand, SubmitCharterTextHandler, SubmitCharterTextResult,
};
pub use document::{
    AddCommentCommand, AddCommentHandler, ChangeDraftStateCommand, ChangeDraftStateHandler,
    ChangeDraftStateResult, DocumentHistoryView, DocumentView, GetDocumentHandler,
    GetDocumentHistoryHandler, GetDocumentHistoryQuery, GetDocumentQuery, RegisterDraftCommand,
    RegisterDraftHandler, RegisterDraftResult, SubmitDraftRevisionCommand,
    SubmitDraftRevisionHandler, SubmitDraftRevisionResult,
};
