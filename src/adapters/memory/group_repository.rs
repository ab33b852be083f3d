//! In-memory group repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, GroupAcronym};
use crate::domain::group::{Group, GroupEvent, Milestone};
use crate::ports::GroupRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupRepository {
    groups: Arc<RwLock<HashMap<GroupAcronym, Group>>>,
    milestones: Arc<RwLock<Vec<Milestone>>>,
    events: Arc<RwLock<Vec<GroupEvent>>>,
}

impl InMemoryGroupRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn save(&self, group: &Group) -> Result<(), DomainError> {
        let mut groups = self.groups.write().await;
        if groups.contains_key(group.acronym()) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Group already exists: {}", group.acronym()),
            ));
        }
        groups.insert(group.acronym().clone(), group.clone());
        Ok(())
    }

    async fn update(&self, group: &Group) -> Result<(), DomainError> {
        let mut groups = self.groups.write().await;
        match groups.get_mut(group.acronym()) {
            Some(stored) => {
                *stored = group.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::GroupNotFound,
                format!("Group not found: {}", group.acronym()),
            )),
        }
    }

    async fn find_by_acronym(&self, acronym: &GroupAcronym) -> Result<Option<Group>, DomainError> {
        Ok(self.groups.read().await.get(acronym).cloned())
    }

    async fn milestones(&self, acronym: &GroupAcronym) -> Result<Vec<Milestone>, DomainError> {
        let mut milestones: Vec<Milestone> = self
            .milestones
            .read()
            .await
            .iter()
            .filter(|m| m.group == *acronym)
            .cloned()
            .collect();
        milestones.sort_by(|a, b| a.due.cmp(&b.due).then(a.desc.cmp(&b.desc)));
        Ok(milestones)
    }

    async fn save_milestone(&self, milestone: &Milestone) -> Result<(), DomainError> {
        let mut milestones = self.milestones.write().await;
        match milestones.iter_mut().find(|m| m.id == milestone.id) {
            Some(stored) => *stored = milestone.clone(),
            None => milestones.push(milestone.clone()),
        }
        Ok(())
    }

    async fn append_event(&self, event: &GroupEvent) -> Result<(), DomainError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn events(&self, acronym: &GroupAcronym) -> Result<Vec<GroupEvent>, DomainError> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.group == *acronym)
            .cloned()
            .collect())
    }
}
