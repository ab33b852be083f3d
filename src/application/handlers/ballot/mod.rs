//! Ballot handlers: issuing, closing, positions and summaries.

mod ballot_summary;
mod close_ballot;
mod edit_position;
mod issue_ballot;
mod send_position_email;

pub use ballot_summary::{BallotSummary, BallotSummaryHandler, BallotSummaryQuery, BalloterPosition};
pub use close_ballot::{CloseBallotCommand, CloseBallotHandler};
pub use edit_position::{EditPositionCommand, EditPositionHandler, EditPositionResult};
pub use issue_ballot::{IssueBallotCommand, IssueBallotHandler, IssueBallotResult};
pub use send_position_email::{SendPositionEmailCommand, SendPositionEmailHandler};

use crate::domain::ballot::Ballot;
use crate::domain::doc_event::DocEventLog;
use crate::domain::document::DocumentError;
use crate::domain::foundation::DocEventId;

/// The ballot with the given id, or the document's active ballot.
fn resolve_ballot(log: &DocEventLog, ballot_id: Option<DocEventId>) -> Result<Ballot, DocumentError> {
    match ballot_id {
        Some(id) => log
            .ballot(id)
            .ok_or_else(|| DocumentError::not_found(format!("Ballot {} not found on {}", id, log.doc()))),
        None => log
            .active_ballot()
            .ok_or_else(|| DocumentError::not_found(format!("No active ballot on {}", log.doc()))),
    }
}
