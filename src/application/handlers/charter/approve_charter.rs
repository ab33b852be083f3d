//! ApproveCharterHandler - records IESG approval of a charter under review.

use std::sync::Arc;

use crate::application::support::{
    load_group, load_typed_document, publish_doc_events, DocEventRecorder, DocLocks,
};
use crate::domain::ballot::{close_ballot, BallotType};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::{CharterState, DocType, Document, DocumentError};
use crate::domain::foundation::{CommandMetadata, DocName};
use crate::domain::group::{merge_on_approval, GroupEvent, GroupState};
use crate::ports::{CharterTextStorage, DocumentRepository, EventPublisher, GroupRepository};

use super::workflow::CharterWorkflow;

#[derive(Debug, Clone)]
pub struct ApproveCharterCommand {
    pub name: DocName,
}

#[derive(Debug, Clone)]
pub struct ApproveCharterResult {
    pub document: Document,
    pub events: Vec<DocEvent>,
}

pub struct ApproveCharterHandler {
    workflow: CharterWorkflow,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl ApproveCharterHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        groups: Arc<dyn GroupRepository>,
        texts: Arc<dyn CharterTextStorage>,
        recorder: DocEventRecorder,
        publisher: Arc<dyn EventPublisher>,
        locks: DocLocks,
    ) -> Self {
        Self {
            workflow: CharterWorkflow {
                documents,
                groups,
                texts,
                recorder,
            },
            publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApproveCharterCommand,
        metadata: CommandMetadata,
    ) -> Result<ApproveCharterResult, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;
        let workflow = &self.workflow;
        let documents = workflow.documents.as_ref();
        let mut document = load_typed_document(documents, &cmd.name, DocType::Charter).await?;
        let previous = document.charter_state().unwrap_or_default();
        if previous != CharterState::IesgRev {
            return Err(DocumentError::invalid_state(format!(
                "{} can only be approved from iesgrev, not {}",
                document.name(),
                previous.slug()
            )));
        }
        let acronym = document
            .group()
            .cloned()
            .ok_or_else(|| DocumentError::invalid_state(format!("{} has no group", cmd.name)))?;
        let mut group = load_group(workflow.groups.as_ref(), &acronym).await?;

        let next = document.rev().next_approved()?;
        if !workflow.copy_text_if_present(&document, next).await? {
            return Err(DocumentError::not_found(format!(
                "No charter text for {}",
                document.name_with_rev()
            )));
        }

        let by = metadata.actor;
        let recorder = &workflow.recorder;
        let mut log = recorder.log_for(document.name()).await?;
        let mut events = Vec::new();

        if let Some(closing) = close_ballot(&log, &document, by, BallotType::CharterApprove) {
            events.push(recorder.record(&mut log, closing).await?);
        }
        events.push(
            recorder
                .record(
                    &mut log,
                    NewDocEvent::new(
                        document.name().clone(),
                        document.rev(),
                        by,
                        "IESG has approved the charter",
                        DocEventKind::IesgApproved,
                    ),
                )
                .await?,
        );

        document.set_revision(next)?;
        events.push(workflow.new_revision(&mut log, &document, by).await?);
        document.set_charter_state(CharterState::Approved)?;
        workflow.documents.update(&document).await?;
        events.push(
            workflow
                .changed_state(&mut log, &document, previous, CharterState::Approved, by)
                .await?,
        );

        workflow.set_group_state(&mut group, GroupState::Active, by).await?;
        let milestones = workflow.groups.milestones(group.acronym()).await?;
        for change in merge_on_approval(&milestones) {
            workflow.groups.save_milestone(&change.milestone).await?;
            if let Some(desc) = change.desc {
                workflow
                    .groups
                    .append_event(&GroupEvent::changed_milestone(
                        group.acronym().clone(),
                        by,
                        change.milestone.id,
                        desc,
                    ))
                    .await?;
            }
        }

        tracing::info!(
            doc = %document.name(),
            rev = %document.rev(),
            group = %acronym,
            "Charter approved"
        );
        publish_doc_events(self.publisher.as_ref(), &events, &metadata).await;
        Ok(ApproveCharterResult { document, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::charter::{
        ChangeCharterStateCommand, ChangeCharterStateHandler, StartCharteringCommand,
        StartCharteringHandler, SubmitCharterTextCommand, SubmitCharterTextHandler,
    };
    use crate::application::testing::{acronym, TestWorld};
    use crate::domain::doc_event::DocEventType;
    use crate::domain::document::Revision;
    use crate::domain::group::{Milestone, MilestoneState};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    async fn in_iesg_review(world: &TestWorld, text: Option<&str>) -> Document {
        let doc = StartCharteringHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.texts.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
        .handle(
            StartCharteringCommand {
                group: acronym("foo"),
                target: CharterState::IntRev,
                without_external_review: false,
            },
            world.metadata(),
        )
        .await
        .unwrap()
        .document;

        if let Some(text) = text {
            SubmitCharterTextHandler::new(
                world.documents.clone(),
                world.texts.clone(),
                world.recorder(),
                world.bus.clone(),
                world.locks.clone(),
            )
            .handle(
                SubmitCharterTextCommand {
                    name: doc.name().clone(),
                    text: text.to_string(),
                },
                world.metadata(),
            )
            .await
            .unwrap();
        }

        let change = ChangeCharterStateHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.texts.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        );
        for target in [CharterState::ExtRev, CharterState::IesgRev] {
            change
                .handle(
                    ChangeCharterStateCommand {
                        name: doc.name().clone(),
                        target,
                        without_external_review: false,
                        comment: None,
                    },
                    world.metadata(),
                )
                .await
                .unwrap();
        }
        world.reload(doc.name()).await
    }

    fn handler(world: &TestWorld) -> ApproveCharterHandler {
        ApproveCharterHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.texts.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
    }

    fn milestone(desc: &str, state: MilestoneState) -> Milestone {
        Milestone::new(
            acronym("foo"),
            desc,
            NaiveDate::from_ymd_opt(2027, 6, 1).unwrap(),
            BTreeSet::new(),
            state,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn approval_moves_to_next_approved_revision() {
        let world = TestWorld::new().await;
        let doc = in_iesg_review(&world, Some("The Foo WG will...")).await;

        let result = handler(&world)
            .handle(
                ApproveCharterCommand {
                    name: doc.name().clone(),
                },
                world.metadata(),
            )
            .await
            .unwrap();

        let approved = Revision::parse("01").unwrap();
        assert_eq!(result.document.rev(), approved);
        assert_eq!(result.document.charter_state(), Some(CharterState::Approved));
        let types: Vec<DocEventType> = result.events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                DocEventType::ClosedBallot,
                DocEventType::IesgApproved,
                DocEventType::NewRevision,
                DocEventType::ChangedState,
            ]
        );
        assert_eq!(
            world.texts.read(doc.name(), approved).await.unwrap(),
            "The Foo WG will..."
        );
        assert_eq!(world.group("foo").await.state(), GroupState::Active);
        assert!(world.log(doc.name()).await.open_ballots().is_empty());
    }

    #[tokio::test]
    async fn approval_needs_charter_text() {
        let world = TestWorld::new().await;
        let doc = in_iesg_review(&world, None).await;

        let err = handler(&world)
            .handle(
                ApproveCharterCommand {
                    name: doc.name().clone(),
                },
                world.metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentError::NotFound(_)));
        assert_eq!(
            world.reload(doc.name()).await.charter_state(),
            Some(CharterState::IesgRev)
        );
    }

    #[tokio::test]
    async fn only_iesg_review_can_be_approved() {
        let world = TestWorld::new().await;
        let doc = StartCharteringHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.texts.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
        .handle(
            StartCharteringCommand {
                group: acronym("foo"),
                target: CharterState::InfRev,
                without_external_review: false,
            },
            world.metadata(),
        )
        .await
        .unwrap()
        .document;

        let err = handler(&world)
            .handle(
                ApproveCharterCommand {
                    name: doc.name().clone(),
                },
                world.metadata(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::InvalidState(_)));
    }

    #[tokio::test]
    async fn milestones_are_merged() {
        let world = TestWorld::new().await;
        let doc = in_iesg_review(&world, Some("charter")).await;
        let kept = milestone("Submit protocol", MilestoneState::Review);
        let dropped = milestone("Old deliverable", MilestoneState::Active);
        let same_as_kept = milestone("Submit protocol", MilestoneState::Charter);
        let added = milestone("New deliverable", MilestoneState::Charter);
        for m in [&kept, &dropped, &same_as_kept, &added] {
            world.groups.save_milestone(m).await.unwrap();
        }

        handler(&world)
            .handle(
                ApproveCharterCommand {
                    name: doc.name().clone(),
                },
                world.metadata(),
            )
            .await
            .unwrap();

        let milestones = world.groups.milestones(&acronym("foo")).await.unwrap();
        let state_of = |id| milestones.iter().find(|m| m.id == id).map(|m| m.state);
        assert_eq!(state_of(kept.id), Some(MilestoneState::Active));
        assert_eq!(state_of(dropped.id), Some(MilestoneState::Deleted));
        assert_eq!(state_of(same_as_kept.id), Some(MilestoneState::Deleted));
        assert_eq!(state_of(added.id), Some(MilestoneState::Active));

        let descs: Vec<String> = world
            .groups
            .events(&acronym("foo"))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.desc)
            .collect();
        assert!(descs.contains(
            &"Added milestone \"New deliverable\", due 2027-06-01, from approved charter".to_string()
        ));
        assert!(descs.contains(
            &"Deleted milestone \"Old deliverable\", not present in approved charter".to_string()
        ));
    }
}
