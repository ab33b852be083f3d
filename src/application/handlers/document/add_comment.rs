//! AddCommentHandler - appends a free-text comment to a document's history.

use std::sync::Arc;

use crate::application::support::{load_document, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::DocumentError;
use crate::domain::foundation::{CommandMetadata, DocName};
use crate::ports::{DocumentRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct AddCommentCommand {
    pub name: DocName,
    pub comment: String,
}

pub struct AddCommentHandler {
    documents: Arc<dyn DocumentRepository>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl AddCommentHandler {
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
        cmd: AddCommentCommand,
        metadata: CommandMetadata,
    ) -> Result<DocEvent, DocumentError> {
        let comment = cmd.comment.trim();
        if comment.is_empty() {
            return Err(DocumentError::validation("comment", "Comment cannot be empty"));
        }

        let _guard = self.locks.lock(&cmd.name).await;
        let document = load_document(self.documents.as_ref(), &cmd.name).await?;
        let mut log = self.recorder.log_for(document.name()).await?;
        let event = self
            .recorder
            .record(
                &mut log,
                NewDocEvent::new(
                    document.name().clone(),
                    document.rev(),
                    metadata.actor,
                    comment,
                    DocEventKind::AddedComment,
                ),
            )
            .await?;

        publish_doc_events(self.publisher.as_ref(), std::slice::from_ref(&event), &metadata).await;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::TestWorld;
    use crate::domain::document::Stream;

    #[tokio::test]
    async fn appends_trimmed_comment() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;
        let handler = AddCommentHandler::new(
            world.documents.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        );

        let event = handler
            .handle(
                AddCommentCommand {
                    name: doc.name().clone(),
                    comment: "  Telechat agenda set  ".to_string(),
                },
                world.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(event.desc, "Telechat agenda set");
        assert_eq!(event.by, world.secretary);
    }

    #[tokio::test]
    async fn rejects_blank_comment() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;
        let handler = AddCommentHandler::new(
            world.documents.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        );

        let err = handler
            .handle(
                AddCommentCommand {
                    name: doc.name().clone(),
                    comment: "   ".to_string(),
                },
                world.metadata(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::ValidationFailed { .. }));
    }
}
