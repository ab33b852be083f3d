//! CloseBallotHandler - closes the open ballot of a given type.

use std::sync::Arc;

use crate::application::support::{load_document, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::ballot::{close_ballot, BallotType};
use crate::domain::doc_event::DocEvent;
use crate::domain::document::DocumentError;
use crate::domain::foundation::{CommandMetadata, DocName};
use crate::ports::{DocumentRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct CloseBallotCommand {
    pub name: DocName,
    pub ballot_type: BallotType,
}

pub struct CloseBallotHandler {
    documents: Arc<dyn DocumentRepository>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl CloseBallotHandler {
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
        cmd: CloseBallotCommand,
        metadata: CommandMetadata,
    ) -> Result<DocEvent, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;
        let document = load_document(self.documents.as_ref(), &cmd.name).await?;
        let mut log = self.recorder.log_for(document.name()).await?;

        let closing = close_ballot(&log, &document, metadata.actor, cmd.ballot_type).ok_or_else(|| {
            DocumentError::not_found(format!(
                "No open {} ballot on {}",
                cmd.ballot_type.slug(),
                document.name()
            ))
        })?;
        let event = self.recorder.record(&mut log, closing).await?;

        tracing::info!(doc = %document.name(), ballot_type = cmd.ballot_type.slug(), "Ballot closed");
        publish_doc_events(self.publisher.as_ref(), std::slice::from_ref(&event), &metadata).await;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::ballot::{IssueBallotCommand, IssueBallotHandler};
    use crate::application::testing::TestWorld;
    use crate::domain::doc_event::DocEventKind;
    use crate::domain::document::Stream;

    fn handler(world: &TestWorld) -> CloseBallotHandler {
        CloseBallotHandler::new(
            world.documents.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
    }

    #[tokio::test]
    async fn closes_open_ballot() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;
        let issued = IssueBallotHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.people.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
        .handle(
            IssueBallotCommand {
                name: doc.name().clone(),
                ballot_type: BallotType::DraftApprove,
                auto_yes: false,
            },
            world.metadata(),
        )
        .await
        .unwrap();

        let event = handler(&world)
            .handle(
                CloseBallotCommand {
                    name: doc.name().clone(),
                    ballot_type: BallotType::DraftApprove,
                },
                world.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(
            event.kind,
            DocEventKind::ClosedBallot {
                ballot_type: BallotType::DraftApprove,
                ballot_id: issued.ballot.id(),
            }
        );
        assert!(world.log(doc.name()).await.open_ballots().is_empty());
    }

    #[tokio::test]
    async fn nothing_open_is_not_found() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;

        let err = handler(&world)
            .handle(
                CloseBallotCommand {
                    name: doc.name().clone(),
                    ballot_type: BallotType::DraftApprove,
                },
                world.metadata(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
