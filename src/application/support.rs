//! Plumbing shared by the document, ballot and charter handlers.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::ballot::VotingBody;
use crate::domain::doc_event::{DocEvent, DocEventLog, NewDocEvent};
use crate::domain::document::{DocType, Document, DocumentError};
use crate::domain::foundation::{
    CommandMetadata, DocName, DomainError, EventEnvelope, GroupAcronym, PersonId,
};
use crate::domain::group::{Group, Role, RoleName};
use crate::ports::{DocEventStore, DocumentRepository, EventPublisher, GroupRepository, PersonDirectory};

/// Appends DocEvents to the store and keeps an in-memory log in step.
#[derive(Clone)]
pub struct DocEventRecorder {
    store: Arc<dyn DocEventStore>,
}

impl DocEventRecorder {
    pub fn new(store: Arc<dyn DocEventStore>) -> Self {
        Self { store }
    }

    pub async fn log_for(&self, doc: &DocName) -> Result<DocEventLog, DomainError> {
        self.store.log_for(doc).await
    }

    pub async fn record(
        &self,
        log: &mut DocEventLog,
        event: NewDocEvent,
    ) -> Result<DocEvent, DomainError> {
        let stored = self.store.append(event).await?;
        log.record(stored.clone());
        Ok(stored)
    }

    pub async fn record_all(
        &self,
        log: &mut DocEventLog,
        events: impl IntoIterator<Item = NewDocEvent>,
    ) -> Result<Vec<DocEvent>, DomainError> {
        let mut stored = Vec::new();
        for event in events {
            stored.push(self.record(log, event).await?);
        }
        Ok(stored)
    }
}

/// Publishes appended DocEvents on the bus.
///
/// The transition is already persisted at this point, so publish failures
/// are logged rather than returned.
pub async fn publish_doc_events(
    publisher: &dyn EventPublisher,
    events: &[DocEvent],
    metadata: &CommandMetadata,
) {
    let correlation_id = metadata.correlation_id();
    let mut envelopes = Vec::with_capacity(events.len());
    for event in events {
        match EventEnvelope::from_event(event) {
            Ok(envelope) => envelopes.push(
                envelope
                    .with_correlation_id(correlation_id.clone())
                    .with_actor_id(metadata.actor.to_string()),
            ),
            Err(e) => tracing::warn!(doc = %event.doc, error = %e, "Failed to wrap DocEvent"),
        }
    }
    if let Err(e) = publisher.publish_all(envelopes).await {
        tracing::warn!(error = %e, "Failed to publish DocEvents");
    }
}

/// Serializes commands on the same document.
///
/// Two concurrent commands could otherwise both see "no open ballot" and
/// open two.
#[derive(Debug, Clone, Default)]
pub struct DocLocks {
    locks: Arc<Mutex<HashMap<DocName, Arc<Mutex<()>>>>>,
}

impl DocLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, doc: &DocName) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Holders and waiters keep a clone; the map's own copy alone is idle.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(doc.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

pub async fn load_document(
    documents: &dyn DocumentRepository,
    name: &DocName,
) -> Result<Document, DocumentError> {
    documents
        .find_by_name(name)
        .await?
        .ok_or_else(|| DocumentError::not_found(format!("Document not found: {}", name)))
}

pub async fn load_typed_document(
    documents: &dyn DocumentRepository,
    name: &DocName,
    doc_type: DocType,
) -> Result<Document, DocumentError> {
    let doc = load_document(documents, name).await?;
    doc.ensure_type(doc_type)?;
    Ok(doc)
}

pub async fn load_group(
    groups: &dyn GroupRepository,
    acronym: &GroupAcronym,
) -> Result<Group, DocumentError> {
    groups
        .find_by_acronym(acronym)
        .await?
        .ok_or_else(|| DocumentError::not_found(format!("Group not found: {}", acronym)))
}

/// Role names that make a member of a voting body eligible to ballot.
pub fn balloting_roles(body: VotingBody) -> &'static [RoleName] {
    match body {
        VotingBody::Iesg => &[RoleName::Ad],
        VotingBody::Irsg | VotingBody::Rsab => &[RoleName::Chair, RoleName::Member],
    }
}

/// Current balloters of a voting body, one entry per person.
///
/// A missing body group yields no balloters.
pub async fn voting_body_members(
    groups: &dyn GroupRepository,
    body: VotingBody,
) -> Result<Vec<Role>, DomainError> {
    let acronym = GroupAcronym::new(body.acronym())?;
    let Some(group) = groups.find_by_acronym(&acronym).await? else {
        tracing::warn!(body = %body, "Voting body group is not configured");
        return Ok(Vec::new());
    };
    let mut members: Vec<Role> = Vec::new();
    for role in group.role_holders(balloting_roles(body)) {
        if !members.iter().any(|m| m.person == role.person) {
            members.push(role.clone());
        }
    }
    Ok(members)
}

/// Display name of a person, falling back to the given address.
pub async fn person_name(
    people: &dyn PersonDirectory,
    id: &PersonId,
    fallback: &str,
) -> Result<String, DomainError> {
    Ok(people
        .find(id)
        .await?
        .map(|p| p.name)
        .unwrap_or_else(|| fallback.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGroupRepository;
    use crate::domain::group::{GroupState, GroupType};

    #[tokio::test]
    async fn doc_locks_serialize_per_document() {
        let locks = DocLocks::new();
        let name = DocName::new("draft-foo").unwrap();
        let guard = locks.lock(&name).await;

        let other = DocName::new("draft-bar").unwrap();
        let _independent = locks.lock(&other).await;

        let locks2 = locks.clone();
        let name2 = name.clone();
        let waiter = tokio::spawn(async move {
            let _g = locks2.lock(&name2).await;
        });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());
        drop(guard);
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn idle_doc_locks_are_released() {
        let locks = DocLocks::new();
        for name in ["draft-foo", "draft-bar", "draft-baz"] {
            let _guard = locks.lock(&DocName::new(name).unwrap()).await;
        }
        assert_eq!(locks.tracked().await, 1);

        let held = locks.lock(&DocName::new("draft-foo").unwrap()).await;
        let _other = locks.lock(&DocName::new("draft-bar").unwrap()).await;
        assert_eq!(locks.tracked().await, 2);
        drop(held);
    }

    #[tokio::test]
    async fn voting_body_members_are_role_holders() {
        let groups = InMemoryGroupRepository::new();
        let ad = PersonId::new();
        let group = Group::new(
            GroupAcronym::new("iesg").unwrap(),
            "Internet Engineering Steering Group",
            GroupType::Ietf,
            GroupState::Active,
        )
        .unwrap()
        .with_role(Role::new(RoleName::Ad, ad, "ad@ietf.org"))
        .with_role(Role::new(RoleName::Chair, ad, "chair@ietf.org"))
        .with_role(Role::new(RoleName::Secr, PersonId::new(), "secr@ietf.org"));
        groups.save(&group).await.unwrap();

        let members = voting_body_members(&groups, VotingBody::Iesg).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].person, ad);
    }

    #[tokio::test]
    async fn missing_voting_body_has_no_members() {
        let groups = InMemoryGroupRepository::new();
        let members = voting_body_members(&groups, VotingBody::Rsab).await.unwrap();
        assert!(members.is_empty());
    }
}
