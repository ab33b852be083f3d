//! SubmitCharterTextHandler - stores a new charter text revision.
//!
//! The first text of a proposal revision is stored under that revision.
//! Later texts move the charter to the next proposal revision, so an
//! approved `01` becomes `01-00` and `01-00` becomes `01-01`.

use std::sync::Arc;

use crate::application::support::{load_typed_document, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::{DocType, Document, DocumentError};
use crate::domain::foundation::{CommandMetadata, DocName, DomainError};
use crate::ports::{CharterTextStorage, DocumentRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct SubmitCharterTextCommand {
    pub name: DocName,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SubmitCharterTextResult {
    pub document: Document,
    pub event: DocEvent,
}

pub struct SubmitCharterTextHandler {
    documents: Arc<dyn DocumentRepository>,
    texts: Arc<dyn CharterTextStorage>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl SubmitCharterTextHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        texts: Arc<dyn CharterTextStorage>,
        recorder: DocEventRecorder,
        publisher: Arc<dyn EventPublisher>,
        locks: DocLocks,
    ) -> Self {
        Self {
            documents,
            texts,
            recorder,
            publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitCharterTextCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitCharterTextResult, DocumentError> {
        if cmd.text.trim().is_empty() {
            return Err(DocumentError::validation("text", "Charter text cannot be empty"));
        }

        let _guard = self.locks.lock(&cmd.name).await;
        let mut document =
            load_typed_document(self.documents.as_ref(), &cmd.name, DocType::Charter).await?;
        let current = document.rev();
        let first_text = current.is_proposal()
            && !self
                .texts
                .exists(document.name(), current)
                .await
                .map_err(DomainError::from)?;
        let rev = if first_text { current } else { current.next_charter()? };

        self.texts
            .write(document.name(), rev, &cmd.text)
            .await
            .map_err(DomainError::from)?;
        if rev != current {
            document.set_revision(rev)?;
            self.documents.update(&document).await?;
        }

        let mut log = self.recorder.log_for(document.name()).await?;
        let event = self
            .recorder
            .record(
                &mut log,
                NewDocEvent::new(
                    document.name().clone(),
                    rev,
                    metadata.actor,
                    format!("New version available: {}.txt", document.name_with_rev()),
                    DocEventKind::NewRevision,
                ),
            )
            .await?;

        tracing::info!(doc = %document.name(), rev = %rev, "Charter text submitted");
        publish_doc_events(self.publisher.as_ref(), std::slice::from_ref(&event), &metadata).await;
        Ok(SubmitCharterTextResult { document, event })
    }
}
