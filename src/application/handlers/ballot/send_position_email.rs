//! SendPositionEmailHandler - mails a balloter's recorded position to the
//! voting body.
//!
//! Unlike the automatic notifications, this is an explicit request, so a
//! transport failure is returned to the caller.

use std::sync::Arc;

use crate::application::support::load_document;
use crate::domain::document::DocumentError;
use crate::domain::foundation::{DocEventId, DocName, PersonId};
use crate::domain::mail::{
    gather_address_lists, MailTrigger, MessageComposer, OutgoingMessage, RecipientContext,
};
use crate::ports::{DocEventStore, DocumentRepository, GroupRepository, Mailer, PersonDirectory};

use super::resolve_ballot;

#[derive(Debug, Clone)]
pub struct SendPositionEmailCommand {
    pub name: DocName,
    pub ballot_id: Option<DocEventId>,
    pub balloter: PersonId,
    pub extra_cc: Vec<String>,
}

pub struct SendPositionEmailHandler {
    documents: Arc<dyn DocumentRepository>,
    events: Arc<dyn DocEventStore>,
    groups: Arc<dyn GroupRepository>,
    people: Arc<dyn PersonDirectory>,
    mailer: Arc<dyn Mailer>,
    composer: MessageComposer,
}

impl SendPositionEmailHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        events: Arc<dyn DocEventStore>,
        groups: Arc<dyn GroupRepository>,
        people: Arc<dyn PersonDirectory>,
        mailer: Arc<dyn Mailer>,
        composer: MessageComposer,
    ) -> Self {
        Self {
            documents,
            events,
            groups,
            people,
            mailer,
            composer,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendPositionEmailCommand,
    ) -> Result<OutgoingMessage, DocumentError> {
        let document = load_document(self.documents.as_ref(), &cmd.name).await?;
        let log = self.events.log_for(document.name()).await?;
        let ballot = resolve_ballot(&log, cmd.ballot_id)?;
        let position = ballot.position_of(&cmd.balloter).ok_or_else(|| {
            DocumentError::not_found(format!(
                "No position recorded for {} on {}",
                cmd.balloter,
                document.name()
            ))
        })?;
        let balloter = self
            .people
            .find(&cmd.balloter)
            .await?
            .ok_or_else(|| DocumentError::not_found(format!("Person not found: {}", cmd.balloter)))?;

        let doc_ad = match document.ad() {
            Some(id) => self.people.find(id).await?,
            None => None,
        };
        let group = match document.group() {
            Some(acronym) => self.groups.find_by_acronym(acronym).await?,
            None => None,
        };
        let ctx = RecipientContext {
            doc: Some(&document),
            doc_ad: doc_ad.as_ref(),
            group: group.as_ref(),
            ballot_type: Some(ballot.ballot_type()),
        };
        let addresses =
            gather_address_lists(MailTrigger::BallotSaved, &ctx).with_extra_cc(&cmd.extra_cc);
        let message = self.composer.ballot_position(&document, &balloter, position, addresses);

        self.mailer
            .send(&message)
            .await
            .map_err(|e| DocumentError::infrastructure(e.to_string()))?;
        tracing::info!(doc = %document.name(), balloter = %cmd.balloter, "Ballot position mailed");
        Ok(message)
    }
}
