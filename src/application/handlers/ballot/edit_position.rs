//! EditPositionHandler - records a balloter's position on a ballot.
//!
//! The balloter must hold a balloting role in the ballot's voting body.
//! The actor may be the balloter or someone entering the position for
//! them; the event is attributed to the actor.

use std::sync::Arc;

use crate::application::support::{
    load_document, person_name, publish_doc_events, voting_body_members, DocEventRecorder, DocLocks,
};
use crate::domain::ballot::{plan_position_change, Ballot, PositionName, PositionSubmission};
use crate::domain::doc_event::DocEvent;
use crate::domain::document::DocumentError;
use crate::domain::foundation::{CommandMetadata, DocEventId, DocName, PersonId};
use crate::ports::{DocumentRepository, EventPublisher, GroupRepository, PersonDirectory};

use super::resolve_ballot;

#[derive(Debug, Clone)]
pub struct EditPositionCommand {
    pub name: DocName,
    /// Defaults to the document's active ballot.
    pub ballot_id: Option<DocEventId>,
    pub balloter: PersonId,
    pub pos: PositionName,
    pub discuss: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditPositionResult {
    pub ballot: Ballot,
    /// `None` when the submission changed nothing.
    pub event: Option<DocEvent>,
}

pub struct EditPositionHandler {
    documents: Arc<dyn DocumentRepository>,
    groups: Arc<dyn GroupRepository>,
    people: Arc<dyn PersonDirectory>,
    recorder: DocEventRecorder,
    publisher: Arc<dyn EventPublisher>,
    locks: DocLocks,
}

impl EditPositionHandler {
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
        cmd: EditPositionCommand,
        metadata: CommandMetadata,
    ) -> Result<EditPositionResult, DocumentError> {
        let _guard = self.locks.lock(&cmd.name).await;
        let document = load_document(self.documents.as_ref(), &cmd.name).await?;
        let mut log = self.recorder.log_for(document.name()).await?;
        let ballot = resolve_ballot(&log, cmd.ballot_id)?;

        let body = ballot.ballot_type().voting_body();
        let members = voting_body_members(self.groups.as_ref(), body).await?;
        let role = members
            .iter()
            .find(|r| r.person == cmd.balloter)
            .ok_or_else(|| {
                DocumentError::forbidden(format!("{} is not an {} balloter", cmd.balloter, body))
            })?;

        let submission = PositionSubmission {
            balloter: cmd.balloter,
            balloter_name: person_name(self.people.as_ref(), &cmd.balloter, &role.email).await?,
            pos: cmd.pos,
            discuss: cmd.discuss,
            comment: cmd.comment,
        };
        let Some(change) = plan_position_change(&ballot, &document, submission, metadata.actor)? else {
            tracing::debug!(doc = %document.name(), balloter = %cmd.balloter, "Position unchanged");
            return Ok(EditPositionResult { ballot, event: None });
        };

        let event = self.recorder.record(&mut log, change).await?;
        let ballot = log
            .ballot(ballot.id())
            .ok_or_else(|| DocumentError::infrastructure("ballot projection missing"))?;

        tracing::info!(
            doc = %document.name(),
            ballot_type = ballot.ballot_type().slug(),
            balloter = %cmd.balloter,
            pos = cmd.pos.slug(),
            "Ballot position recorded"
        );
        publish_doc_events(self.publisher.as_ref(), std::slice::from_ref(&event), &metadata).await;

        Ok(EditPositionResult {
            ballot,
            event: Some(event),
        })
    }
}
