//! ChangeDraftStateHandler - moves a draft through IESG processing.
//!
//! Besides the `changed_state` event, some states drive the ballot:
//! entering `iesg-eva` opens the stream's approval ballot, entering `ann`
//! closes it, and entering `dead` closes every open ballot.

use std::sync::Arc;

use crate::application::support::{load_typed_document, publish_doc_events, DocEventRecorder, DocLocks};
use crate::domain::ballot::{close_ballot, close_open_ballots, create_ballot_if_not_open, BallotType};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::{DocState, DocType, Document, DocumentError, IesgState};
use crate::domain::foundation::{CommandMetadata, DocName};
use crate::ports::{DocumentRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct ChangeDraftStateCommand {
    pub name: DocName,
    pub state: IesgState,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChangeDraftStateResult {
    pub document: Document,
    pub previous: IesgState,
    pub events: Vec<DocEvent>,
}

pub struct ChangeDraftStateHandler {
    documents: Arc<dyn DocumentRepository>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl ChangeDraftStateHandler {
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
        cmd: ChangeDraftStateCommand,
        metadata: CommandMetadata,
    ) -> Result<ChangeDraftStateResult, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;
        let mut document = load_typed_document(self.documents.as_ref(), &cmd.name, DocType::Draft).await?;
        let mut log = self.recorder.log_for(document.name()).await?;
        let by = metadata.actor;

        let previous = document.set_iesg_state(cmd.state)?;
        self.documents.update(&document).await?;

        let mut events = vec![
            self.recorder
                .record(
                    &mut log,
                    NewDocEvent::new(
                        document.name().clone(),
                        document.rev(),
                        by,
                        format!("State changed to {} from {}", cmd.state, previous),
                        DocEventKind::ChangedState {
                            from: Some(DocState::DraftIesg(previous)),
                            to: DocState::DraftIesg(cmd.state),
                        },
                    ),
                )
                .await?,
        ];

        let approval = BallotType::draft_approval_for(document.stream());
        let ballot_events = match (cmd.state, approval) {
            (IesgState::IesgEva, Some(ballot_type)) => {
                create_ballot_if_not_open(&log, &document, by, ballot_type)?
                    .into_iter()
                    .collect()
            }
            (IesgState::Ann, Some(ballot_type)) => {
                close_ballot(&log, &document, by, ballot_type).into_iter().collect()
            }
            (IesgState::Dead, _) => close_open_ballots(&log, &document, by),
            _ => Vec::new(),
        };
        events.extend(self.recorder.record_all(&mut log, ballot_events).await?);

        if let Some(comment) = cmd.comment.filter(|c| !c.trim().is_empty()) {
            events.push(
                self.recorder
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

        tracing::info!(
            doc = %document.name(),
            from = previous.slug(),
            state = cmd.state.slug(),
            "Draft state changed"
        );
        publish_doc_events(self.publisher.as_ref(), &events, &metadata).await;

        Ok(ChangeDraftStateResult {
            document,
            previous,
            events,
        })
    }
}
