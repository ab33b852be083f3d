//! Groups, their roles, milestones and history.

mod aggregate;
mod events;
mod kinds;
mod milestone;

pub use aggregate::{Group, Role};
pub use events::{GroupEvent, GroupEventKind};
pub use kinds::{GroupState, GroupType, RoleName};
pub use milestone::{
    copy_active_to_charter, merge_on_approval, Milestone, MilestoneChange, MilestoneState,
};
