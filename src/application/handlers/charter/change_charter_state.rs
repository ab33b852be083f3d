//! ChangeCharterStateHandler - moves a charter through review.
//!
//! From `notrev` or `approved`, moving into `infrev` or `intrev` starts a
//! new chartering effort. Approval has its own handler.

use std::sync::Arc;

use crate::application::support::{
    load_group, load_typed_document, publish_doc_events, DocEventRecorder, DocLocks,
};
use crate::domain::ballot::{close_open_ballots, create_ballot_if_not_open, BallotType};
use crate::domain::doc_event::{DocEvent, DocEventKind, DocEventLog, NewDocEvent};
use crate::domain::document::{CharterState, DocType, Document, DocumentError};
use crate::domain::foundation::{CommandMetadata, DocName, PersonId};
use crate::domain::group::{Group, GroupState};
use crate::ports::{CharterTextStorage, DocumentRepository, EventPublisher, GroupRepository};

use super::workflow::{review_ballot, CharterWorkflow, Step};

#[derive(Debug, Clone)]
pub struct ChangeCharterStateCommand {
    pub name: DocName,
    pub target: CharterState,
    pub without_external_review: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChangeCharterStateResult {
    pub document: Document,
    pub previous: CharterState,
    pub events: Vec<DocEvent>,
}

pub struct ChangeCharterStateHandler {
    workflow: CharterWorkflow,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl ChangeCharterStateHandler {
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
        cmd: ChangeCharterStateCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeCharterStateResult, DocumentError> {
        if cmd.target == CharterState::Approved {
            return Err(DocumentError::invalid_state(
                "charters are approved through the approval operation",
            ));
        }

        let _guard = self.locks.lock(&cmd.name).await;
        let documents = self.workflow.documents.as_ref();
        let document = load_typed_document(documents, &cmd.name, DocType::Charter).await?;
        let acronym = document
            .group()
            .cloned()
            .ok_or_else(|| DocumentError::invalid_state(format!("{} has no group", cmd.name)))?;
        let mut group = load_group(self.workflow.groups.as_ref(), &acronym).await?;
        let previous = document.charter_state().unwrap_or_default();
        let by = metadata.actor;

        let Step { document, mut events } = if previous.can_start_chartering()
            && matches!(cmd.target, CharterState::InfRev | CharterState::IntRev)
        {
            self.workflow
                .start(&mut group, Some(document), cmd.target, cmd.without_external_review, by)
                .await?
        } else {
            self.review_step(document, &mut group, cmd.target, cmd.without_external_review, by)
                .await?
        };

        if let Some(comment) = cmd.comment.filter(|c| !c.trim().is_empty()) {
            let mut log = self.workflow.recorder.log_for(document.name()).await?;
            events.push(
                self.workflow
                    .recorder
                    .record(
                        &mut log,
                        NewDocEvent::new(
                            document.name().clone(),
                            document.rev(),
                            by,
                            comment.trim(),
                            DocEventKind::AddedComment,
                        ),
                    )
                    .await?,
            );
        }

        publish_doc_events(self.publisher.as_ref(), &events, &metadata).await;
        Ok(ChangeCharterStateResult {
            document,
            previous,
            events,
        })
    }

    async fn review_step(
        &self,
        mut document: Document,
        group: &mut Group,
        target: CharterState,
        without_external_review: bool,
        by: PersonId,
    ) -> Result<Step, DocumentError> {
        let recorder = &self.workflow.recorder;
        let mut log = recorder.log_for(document.name()).await?;

        if target == CharterState::NotRev && document.rev().major() >= 1 {
            return self.abandon_recharter(document, &mut log, by).await;
        }

        let previous = document.set_charter_state(target)?;
        self.workflow.documents.update(&document).await?;
        let mut events = vec![
            self.workflow
                .changed_state(&mut log, &document, previous, target, by)
                .await?,
        ];

        if previous == CharterState::IntRev && target != CharterState::NotRev {
            events.extend(self.workflow.close_review_ballots(&mut log, &document, by).await?);
        }

        match target {
            CharterState::IntRev => {
                let ballot_type = review_ballot(&document, without_external_review);
                if let Some(opened) = create_ballot_if_not_open(&log, &document, by, ballot_type)? {
                    events.push(recorder.record(&mut log, opened).await?);
                }
            }
            CharterState::IesgRev => {
                if let Some(opened) =
                    create_ballot_if_not_open(&log, &document, by, BallotType::CharterApprove)?
                {
                    events.push(recorder.record(&mut log, opened).await?);
                }
            }
            CharterState::NotRev => {
                let closing = close_open_ballots(&log, &document, by);
                events.extend(recorder.record_all(&mut log, closing).await?);
                if group.state() == GroupState::Proposed {
                    self.workflow
                        .set_group_state(group, GroupState::Abandon, by)
                        .await?;
                }
                tracing::info!(doc = %document.name(), "Chartering abandoned");
            }
            _ => {}
        }

        tracing::info!(
            doc = %document.name(),
            from = previous.slug(),
            state = target.slug(),
            "Charter state changed"
        );
        Ok(Step { document, events })
    }

    /// Abandoning a recharter keeps the group chartered under its last
    /// approved charter.
    async fn abandon_recharter(
        &self,
        mut document: Document,
        log: &mut DocEventLog,
        by: PersonId,
    ) -> Result<Step, DocumentError> {
        let recorder = &self.workflow.recorder;
        let closing = close_open_ballots(log, &document, by);
        let mut events = recorder.record_all(log, closing).await?;

        let proposal = document.clone();
        let previous = document.revert_to_approved_charter()?;
        self.workflow.documents.update(&document).await?;
        // Recorded against the proposal revision that was dropped.
        events.push(
            self.workflow
                .changed_state(log, &proposal, previous, CharterState::Approved, by)
                .await?,
        );
        events.push(self.workflow.new_revision(log, &document, by).await?);

        tracing::info!(
            doc = %document.name(),
            rev = %document.rev(),
            from = previous.slug(),
            "Rechartering abandoned"
        );
        Ok(Step { document, events })
    }
}
