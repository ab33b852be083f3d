//! RegisterDraftHandler - creates a draft at revision 00.

use std::sync::Arc;

use crate::application::support::{load_group, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::{Document, DocumentError, NewDraft, StdLevel, Stream};
use crate::domain::foundation::{CommandMetadata, DocName, GroupAcronym, PersonId};
use crate::ports::{DocumentRepository, EventPublisher, GroupRepository};

#[derive(Debug, Clone)]
pub struct RegisterDraftCommand {
    pub name: DocName,
    pub title: String,
    pub group: Option<GroupAcronym>,
    pub stream: Stream,
    pub intended_std_level: Option<StdLevel>,
    pub ad: Option<PersonId>,
    pub notify: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RegisterDraftResult {
    pub document: Document,
    pub event: DocEvent,
}

pub struct RegisterDraftHandler {
    documents: Arc<dyn DocumentRepository>,
    groups: Arc<dyn GroupRepository>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl RegisterDraftHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        groups: Arc<dyn GroupRepository>,
        recorder: DocEventRecorder,
        publisher: Arc<dyn EventPublisher>,
        locks: DocLocks,
    ) -> Self {
        Self {
            documents,
            groups,
            recorder,
            publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterDraftCommand,
        metadata: CommandMetadata,
    ) -> Result<RegisterDraftResult, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;

        if self.documents.exists(&cmd.name).await? {
            return Err(DocumentError::AlreadyExists(cmd.name.to_string()));
        }
        if let Some(group) = &cmd.group {
            load_group(self.groups.as_ref(), group).await?;
        }

        let document = Document::new_draft(NewDraft {
            name: cmd.name,
            title: cmd.title,
            group: cmd.group,
            stream: cmd.stream,
            intended_std_level: cmd.intended_std_level,
            ad: cmd.ad,
            notify: cmd.notify,
        })?;
        self.documents.save(&document).await?;

        let mut log = self.recorder.log_for(document.name()).await?;
        let event = self
            .recorder
            .record(
                &mut log,
                NewDocEvent::new(
                    document.name().clone(),
                    document.rev(),
                    metadata.actor,
                    format!("New version available: {}.txt", document.name_with_rev()),
                    DocEventKind::NewRevision,
                ),
            )
            .await?;

        tracing::info!(doc = %document.name(), rev = %document.rev(), "Draft registered");
        publish_doc_events(self.publisher.as_ref(), std::slice::from_ref(&event), &metadata).await;

        Ok(RegisterDraftResult { document, event })
    }
}
