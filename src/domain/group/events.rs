//! Group event log entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GroupAcronym, MilestoneId, PersonId, Timestamp};

use super::GroupState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupEventKind {
    ChangedState { from: GroupState, to: GroupState },
    ChangedMilestone { milestone: MilestoneId },
}

/// An entry in a group's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEvent {
    pub group: GroupAcronym,
    pub time: Timestamp,
    pub by: PersonId,
    pub desc: String,
    pub kind: GroupEventKind,
}

impl GroupEvent {
    pub fn changed_state(group: GroupAcronym, by: PersonId, from: GroupState, to: GroupState) -> Self {
        Self {
            group,
            time: Timestamp::now(),
            by,
            desc: format!("State changed to {} from {}", to, from),
            kind: GroupEventKind::ChangedState { from, to },
        }
    }

    pub fn changed_milestone(
        group: GroupAcronym,
        by: PersonId,
        milestone: MilestoneId,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            group,
            time: Timestamp::now(),
            by,
            desc: desc.into(),
            kind: GroupEventKind::ChangedMilestone { milestone },
        }
    }
}
