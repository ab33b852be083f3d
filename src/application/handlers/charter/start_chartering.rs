//! StartCharteringHandler - begins chartering or rechartering a group.

use std::sync::Arc;

use crate::application::support::{load_group, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::doc_event::DocEvent;
use crate::domain::document::{CharterState, Document, DocumentError};
use crate::domain::foundation::{CommandMetadata, GroupAcronym};
use crate::ports::{CharterTextStorage, DocumentRepository, EventPublisher, GroupRepository};

use super::workflow::CharterWorkflow;

#[derive(Debug, Clone)]
pub struct StartCharteringCommand {
    pub group: GroupAcronym,
    /// `infrev` or `intrev`.
    pub target: CharterState,
    pub without_external_review: bool,
}

#[derive(Debug, Clone)]
pub struct StartCharteringResult {
    pub document: Document,
    pub events: Vec<DocEvent>,
}

pub struct StartCharteringHandler {
    workflow: CharterWorkflow,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl StartCharteringHandler {
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
        cmd: StartCharteringCommand,
        metadata: CommandMetadata,
    ) -> Result<StartCharteringResult, DocumentError> {
        let groups = self.workflow.groups.as_ref();
        let group = load_group(groups, &cmd.group).await?;
        let name = match group.charter() {
            Some(name) => name.clone(),
            None => group.charter_name()?,
        };
        let _guard = self.locks.lock(&name).await;
        // Another command on this charter may have changed the group meanwhile.
        let mut group = load_group(groups, &cmd.group).await?;

        let existing = self.workflow.documents.find_by_name(&name).await?;
        let step = self
            .workflow
            .start(
                &mut group,
                existing,
                cmd.target,
                cmd.without_external_review,
                metadata.actor,
            )
            .await?;

        publish_doc_events(self.publisher.as_ref(), &step.events, &metadata).await;
        Ok(StartCharteringResult {
            document: step.document,
            events: step.events,
        })
    }
}
