//! ListMilestonesHandler - a group's milestones, soonest due first.

use std::sync::Arc;

use crate::application::support::load_group;
use crate::domain::document::DocumentError;
use crate::domain::foundation::GroupAcronym;
use crate::domain::group::{Milestone, MilestoneState};
use crate::ports::GroupRepository;

#[derive(Debug, Clone)]
pub struct ListMilestonesQuery {
    pub group: GroupAcronym,
    pub include_deleted: bool,
}

pub struct ListMilestonesHandler {
    groups: Arc<dyn GroupRepository>,
}

impl ListMilestonesHandler {
    pub fn new(groups: Arc<dyn GroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn handle(&self, query: ListMilestonesQuery) -> Result<Vec<Milestone>, DocumentError> {
        let group = load_group(self.groups.as_ref(), &query.group).await?;
        let mut milestones = self.groups.milestones(group.acronym()).await?;
        if !query.include_deleted {
            milestones.retain(|m| m.state != MilestoneState::Deleted);
        }
        Ok(milestones)
    }
}
