//! Documents: drafts and charters, their revisions and states.

mod aggregate;
mod charter_state;
mod doc_type;
mod errors;
mod history;
mod iesg_state;
mod revision;
mod state;

pub use aggregate::{Document, NewDraft, MAX_TITLE_LENGTH};
pub use charter_state::CharterState;
pub use doc_type::{DocType, StdLevel, Stream};
pub use errors::DocumentError;
pub use history::DocHistory;
pub use iesg_state::IesgState;
pub use revision::{Revision, MAX_REVISION_COMPONENT};
pub use state::DocState;
