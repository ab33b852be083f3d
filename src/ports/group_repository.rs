//! Group repository port: groups, their milestones and their event log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GroupAcronym};
use crate::domain::group::{Group, GroupEvent, Milestone};

#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Save a new group.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the acronym is taken
    async fn save(&self, group: &Group) -> Result<(), DomainError>;

    /// Update an existing group.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` if the group doesn't exist
    async fn update(&self, group: &Group) -> Result<(), DomainError>;

    async fn find_by_acronym(&self, acronym: &GroupAcronym) -> Result<Option<Group>, DomainError>;

    /// All milestones of a group in any state, ordered by due date.
    async fn milestones(&self, acronym: &GroupAcronym) -> Result<Vec<Milestone>, DomainError>;

    /// Insert or replace a milestone by id.
    async fn save_milestone(&self, milestone: &Milestone) -> Result<(), DomainError>;

    async fn append_event(&self, event: &GroupEvent) -> Result<(), DomainError>;

    /// The group's events, oldest first.
    async fn events(&self, acronym: &GroupAcronym) -> Result<Vec<GroupEvent>, DomainError>;
}
