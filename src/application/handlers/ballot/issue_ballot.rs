//! IssueBallotHandler - opens a ballot and announces it to the voting body.

use std::sync::Arc;

use crate::application::support::{
    load_document, person_name, publish_doc_events, voting_body_members, DocEventRecorder, DocLocks,
};
use crate::domain::ballot::{
    create_ballot_if_not_open, plan_position_change, Ballot, BallotType, PositionName,
    PositionSubmission,
};
use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::DocumentError;
use crate::domain::foundation::{CommandMetadata, DocName};
use crate::ports::{DocumentRepository, EventPublisher, GroupRepository, PersonDirectory};

#[derive(Debug, Clone)]
pub struct IssueBallotCommand {
    pub name: DocName,
    pub ballot_type: BallotType,
    /// Records a YES for the issuer when they are an eligible balloter.
    pub auto_yes: bool,
}

#[derive(Debug, Clone)]
pub struct IssueBallotResult {
    pub ballot: Ballot,
    pub events: Vec<DocEvent>,
}

pub struct IssueBallotHandler {
    documents: Arc<dyn DocumentRepository>,
    groups: Arc<dyn GroupRepository>,
    people: Arc<dyn PersonDirectory>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl IssueBallotHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        groups: Arc<dyn GroupRepository>,
        people: Arc<dyn PersonDirectory>,
        recorder: DocEventRecorder,
        publisher: Arc<dyn EventPublisher>,
        locks: DocLocks,
    ) -> Self {
        Self {
            documents,
            groups,
            people,
            recorder,
            publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: IssueBallotCommand,
        metadata: CommandMetadata,
    ) -> Result<IssueBallotResult, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;
        let document = load_document(self.documents.as_ref(), &cmd.name).await?;
        let mut log = self.recorder.log_for(document.name()).await?;
        let by = metadata.actor;

        let mut events = Vec::new();
        if let Some(opened) = create_ballot_if_not_open(&log, &document, by, cmd.ballot_type)? {
            events.push(self.recorder.record(&mut log, opened).await?);
        }
        let ballot_id = log
            .ballot_open(cmd.ballot_type)
            .map(|e| e.id)
            .ok_or_else(|| DocumentError::infrastructure("ballot did not open"))?;

        events.push(
            self.recorder
                .record(
                    &mut log,
                    NewDocEvent::new(
                        document.name().clone(),
                        document.rev(),
                        by,
                        "Ballot has been issued",
                        DocEventKind::SentBallotAnnouncement {
                            ballot_type: cmd.ballot_type,
                            ballot_id,
                        },
                    ),
                )
                .await?,
        );

        if cmd.auto_yes {
            let members =
                voting_body_members(self.groups.as_ref(), cmd.ballot_type.voting_body()).await?;
            let issuer = members.iter().find(|r| r.person == by);
            let ballot = log
                .ballot(ballot_id)
                .ok_or_else(|| DocumentError::infrastructure("ballot projection missing"))?;
            if let (Some(role), None) = (issuer, ballot.position_of(&by)) {
                let submission = PositionSubmission {
                    balloter: by,
                    balloter_name: person_name(self.people.as_ref(), &by, &role.email).await?,
                    pos: PositionName::Yes,
                    discuss: None,
                    comment: None,
                };
                if let Some(event) = plan_position_change(&ballot, &document, submission, by)? {
                    events.push(self.recorder.record(&mut log, event).await?);
                }
            }
        }

        let ballot = log
            .ballot(ballot_id)
            .ok_or_else(|| DocumentError::infrastructure("ballot projection missing"))?;
        tracing::info!(
            doc = %document.name(),
            ballot_type = cmd.ballot_type.slug(),
            ballot_id = %ballot_id,
            "Ballot issued"
        );
        publish_doc_events(self.publisher.as_ref(), &events, &metadata).await;

        Ok(IssueBallotResult { ballot, events })
    }
}
