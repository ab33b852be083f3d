//! Charter handlers: chartering, review states, text revisions, approval
//! and milestones.

mod approve_charter;
mod change_charter_state;
mod list_milestones;
mod start_chartering;
mod submit_charter_text;
mod workflow;

pub use approve_charter::{ApproveCharterCommand, ApproveCharterHandler, ApproveCharterResult};
pub use change_charter_state::{
    ChangeCharterStateCommand, ChangeCharterStateHandler, ChangeCharterStateResult,
};
pub use list_milestones::{ListMilestonesHandler, ListMilestonesQuery};
pub use start_chartering::{StartCharteringCommand, StartCharteringHandler, StartCharteringResult};
pub use submit_charter_text::{
    SubmitCharterTextCommand, SubmitCharterTextHandler, SubmitCharterTextResult,
};
