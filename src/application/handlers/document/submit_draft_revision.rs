//! SubmitDraftRevisionHandler - records a new draft revision.

use std::sync::Arc;

use crate::application::support::{load_typed_document, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::{DocType, Document, DocumentError, IesgState, Revision};
use crate::domain::foundation::{CommandMetadata, DocName};
use crate::ports::{DocumentRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct SubmitDraftRevisionCommand {
    pub name: DocName,
    pub rev: Revision,
    /// Replaces the title when given.
    pub title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitDraftRevisionResult {
    pub document: Document,
    pub event: DocEvent,
}

pub struct SubmitDraftRevisionHandler {
    documents: Arc<dyn DocumentRepository>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl SubmitDraftRevisionHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        recorder: DocEventRecorder,
        publisher: Arc<dyn EventPublisher>,
        locks: DocLocks,
    ) -> Self {
        Self {
            documents,
            recorder,
            publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitDraftRevisionCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitDraftRevisionResult, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;
        let mut document = load_typed_document(self.documents.as_ref(), &cmd.name, DocType::Draft).await?;

        if document.iesg_state() == Some(IesgState::Pub) {
            return Err(DocumentError::invalid_state(format!(
                "{} has been published as an RFC",
                document.name()
            )));
        }

        document.set_revision(cmd.rev)?;
        if let Some(title) = cmd.title {
            document.set_title(title)?;
        }
        self.documents.update(&document).await?;

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

        tracing::info!(doc = %document.name(), rev = %document.rev(), "New draft revision");
        publish_doc_events(self.publisher.as_ref(), std::slice::from_ref(&event), &metadata).await;

        Ok(SubmitDraftRevisionResult { document, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::TestWorld;
    use crate::domain::document::Stream;

    fn handler(world: &TestWorld) -> SubmitDraftRevisionHandler {
        SubmitDraftRevisionHandler::new(
            world.documents.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
    }

    fn command(doc: &Document, rev: &str) -> SubmitDraftRevisionCommand {
        SubmitDraftRevisionCommand {
            name: doc.name().clone(),
            rev: Revision::parse(rev).unwrap(),
            title: None,
        }
    }

    #[tokio::test]
    async fn accepts_the_next_revision() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;

        let result = handler(&world).handle(command(&doc, "01"), world.metadata()).await.unwrap();

        assert_eq!(result.document.rev().to_string(), "01");
        assert_eq!(world.documents.history(doc.name()).await.unwrap().len(), 1);
        assert_eq!(world.log(doc.name()).await.len(), 1);
    }

    #[tokio::test]
    async fn rejects_skipped_and_repeated_revisions() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;
        let handler = handler(&world);

        let err = handler.handle(command(&doc, "02"), world.metadata()).await.unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRevision(_)));

        let err = handler.handle(command(&doc, "00"), world.metadata()).await.unwrap_err();
        assert!(matches!(err, DocumentError::InvalidRevision(_)));
        assert!(world.log(doc.name()).await.is_empty());
    }

    #[tokio::test]
    async fn rejects_revisions_of_published_drafts() {
        let world = TestWorld::new().await;
        let mut doc = world.draft("draft-foo", Stream::Ietf, None).await;
        for state in [
            IesgState::PubReq,
            IesgState::AdEval,
            IesgState::IesgEva,
            IesgState::Approved,
            IesgState::Ann,
            IesgState::RfcQueue,
            IesgState::Pub,
        ] {
            doc.set_iesg_state(state).unwrap();
        }
        world.documents.update(&doc).await.unwrap();

        let err = handler(&world).handle(command(&doc, "01"), world.metadata()).await.unwrap_err();
        assert!(matches!(err, DocumentError::InvalidState(_)));
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let world = TestWorld::new().await;
        let cmd = SubmitDraftRevisionCommand {
            name: crate::application::testing::doc_name("draft-missing"),
            rev: Revision::parse("01").unwrap(),
            title: None,
        };
        let err = handler(&world).handle(cmd, world.metadata()).await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
