//! Group milestones and how they move between a charter and the group.
//!
//! Milestones in state `charter` belong to the charter under review. When
//! the charter is approved they replace the group's active milestones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::{DocName, DomainError, GroupAcronym, MilestoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Active,
    Charter,
    Review,
    Deleted,
}

impl MilestoneState {
    pub fn slug(&self) -> &'static str {
        match self {
            MilestoneState::Active => "active",
            MilestoneState::Charter => "charter",
            MilestoneState::Review => "review",
            MilestoneState::Deleted => "deleted",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        [
            MilestoneState::Active,
            MilestoneState::Charter,
            MilestoneState::Review,
            MilestoneState::Deleted,
        ]
        .into_iter()
        .find(|s| s.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub group: GroupAcronym,
    pub desc: String,
    pub due: NaiveDate,
    pub docs: BTreeSet<DocName>,
    pub state: MilestoneState,
    pub resolved: Option<String>,
}

impl Milestone {
    pub fn new(
        group: GroupAcronym,
        desc: impl Into<String>,
        due: NaiveDate,
        docs: BTreeSet<DocName>,
        state: MilestoneState,
    ) -> Result<Self, DomainError> {
        let desc = desc.into().trim().to_string();
        if desc.is_empty() {
            return Err(DomainError::validation("desc", "Milestone description cannot be empty"));
        }
        Ok(Self {
            id: MilestoneId::new(),
            group,
            desc,
            due,
            docs,
            state,
            resolved: None,
        })
    }

    /// Same description, due date and documents.
    pub fn same_content(&self, other: &Milestone) -> bool {
        self.desc == other.desc && self.due == other.due && self.docs == other.docs
    }

    fn with_state(&self, state: MilestoneState) -> Milestone {
        Milestone {
            state,
            ..self.clone()
        }
    }
}

/// A milestone to save, with the group event text describing the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneChange {
    pub milestone: Milestone,
    pub desc: Option<String>,
}

/// Copies the active milestones into new charter milestones.
///
/// Nothing is copied when the charter already has milestones.
pub fn copy_active_to_charter(milestones: &[Milestone]) -> Vec<Milestone> {
    if milestones.iter().any(|m| m.state == MilestoneState::Charter) {
        return Vec::new();
    }
    milestones
        .iter()
        .filter(|m| m.state == MilestoneState::Active)
        .map(|m| Milestone {
            id: MilestoneId::new(),
            state: MilestoneState::Charter,
            resolved: None,
            ..m.clone()
        })
        .collect()
}

/// Replaces the group's active milestones by the approved charter's.
///
/// A charter milestone identical to an active or review milestone keeps
/// the existing one (which becomes active) and is itself deleted. Other
/// charter milestones become active. Whatever active or review milestones
/// are left over are deleted.
pub fn merge_on_approval(milestones: &[Milestone]) -> Vec<MilestoneChange> {
    let mut to_delete: Vec<&Milestone> = milestones
        .iter()
        .filter(|m| matches!(m.state, MilestoneState::Active | MilestoneState::Review))
        .collect();
    let mut changes = Vec::new();

    for charter_milestone in milestones.iter().filter(|m| m.state == MilestoneState::Charter) {
        match to_delete.iter().position(|o| o.same_content(charter_milestone)) {
            Some(index) => {
                let existing = to_delete.remove(index);
                if existing.state != MilestoneState::Active {
                    changes.push(MilestoneChange {
                        milestone: existing.with_state(MilestoneState::Active),
                        desc: Some(format!(
                            "Changed milestone \"{}\", set state to active from {}",
                            existing.desc,
                            existing.state.slug()
                        )),
                    });
                }
                changes.push(MilestoneChange {
                    milestone: charter_milestone.with_state(MilestoneState::Deleted),
                    desc: None,
                });
            }
            None => changes.push(MilestoneChange {
                milestone: charter_milestone.with_state(MilestoneState::Active),
                desc: Some(format!(
                    "Added milestone \"{}\", due {}, from approved charter",
                    charter_milestone.desc, charter_milestone.due
                )),
            }),
        }
    }

    for leftover in to_delete {
        changes.push(MilestoneChange {
            milestone: leftover.with_state(MilestoneState::Deleted),
            desc: Some(format!(
                "Deleted milestone \"{}\", not present in approved charter",
                leftover.desc
            )),
        });
    }

    changes
}
