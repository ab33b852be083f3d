//! MailNotifier - Event handler that mails notifications for DocEvents.
//!
//! Subscribed to state changes, ballot announcements and approvals. The
//! change is already committed when the event arrives, so transport
//! failures are logged and swallowed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::doc_event::{DocEvent, DocEventKind};
use crate::domain::document::{CharterState, DocState, Document};
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::group::Group;
use crate::domain::mail::{
    gather_address_lists, AddressList, MailTrigger, MessageComposer, OutgoingMessage,
    RecipientContext,
};
use crate::domain::person::Person;
use crate::ports::{
    CharterTextStorage, DocumentRepository, EventHandler, GroupRepository, Mailer, PersonDirectory,
};

pub struct MailNotifier {
    documents: Arc<dyn DocumentRepository>,
    groups: Arc<dyn GroupRepository>,
    people: Arc<dyn PersonDirectory>,
    texts: Arc<dyn CharterTextStorage>,
    mailer: Arc<dyn Mailer>,
    composer: MessageComposer,
}

/// What a notification is about.
struct Subject {
    doc: Document,
    doc_ad: Option<Person>,
    group: Option<Group>,
}

impl Subject {
    fn addresses(&self, trigger: MailTrigger, ctx: RecipientContext<'_>) -> AddressList {
        let ctx = RecipientContext {
            doc: Some(&self.doc),
            doc_ad: self.doc_ad.as_ref(),
            group: self.group.as_ref(),
            ..ctx
        };
        gather_address_lists(trigger, &ctx)
    }

    fn group(&self) -> Result<&Group, DomainError> {
        self.group.as_ref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::GroupNotFound,
                format!("{} has no group", self.doc.name()),
            )
        })
    }
}

impl MailNotifier {
    /// Event types the notifier subscribes to.
    pub const EVENT_TYPES: [&'static str; 3] = [
        "doc.changed_state.v1",
        "doc.sent_ballot_announcement.v1",
        "doc.iesg_approved.v1",
    ];

    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        groups: Arc<dyn GroupRepository>,
        people: Arc<dyn PersonDirectory>,
        texts: Arc<dyn CharterTextStorage>,
        mailer: Arc<dyn Mailer>,
        composer: MessageComposer,
    ) -> Self {
        Self {
            documents,
            groups,
            people,
            texts,
            mailer,
            composer,
        }
    }

    async fn subject(&self, event: &DocEvent) -> Result<Subject, DomainError> {
        let doc = self.documents.find_by_name(&event.doc).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}", event.doc),
            )
        })?;
        let doc_ad = match doc.ad() {
            Some(id) => self.people.find(id).await?,
            None => None,
        };
        let group = match doc.group() {
            Some(acronym) => self.groups.find_by_acronym(acronym).await?,
            None => None,
        };
        Ok(Subject { doc, doc_ad, group })
    }

    /// Charter text of the current revision, if one was submitted.
    async fn charter_text(&self, doc: &Document) -> Option<String> {
        match self.texts.read(doc.name(), doc.rev()).await {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(doc = %doc.name(), error = %e, "No charter text to include");
                None
            }
        }
    }

    async fn deliver(&self, trigger: MailTrigger, message: OutgoingMessage) {
        if message.to.is_empty() {
            debug!(trigger = trigger.slug(), "No recipients, not sending");
            return;
        }
        match self.mailer.send(&message).await {
            Ok(()) => debug!(trigger = trigger.slug(), subject = %message.subject, "Notification sent"),
            Err(e) => warn!(
                trigger = trigger.slug(),
                subject = %message.subject,
                error = %e,
                "Failed to send notification"
            ),
        }
    }

    async fn on_state_changed(
        &self,
        event: &DocEvent,
        from: Option<DocState>,
        to: DocState,
    ) -> Result<(), DomainError> {
        let subject = self.subject(event).await?;
        let doc = &subject.doc;
        let none = RecipientContext::default();

        let to = match to {
            DocState::DraftIesg(_) => {
                let trigger = MailTrigger::DocStateEdited;
                let message = self.composer.doc_state_changed(
                    doc,
                    &event.desc,
                    subject.addresses(trigger, none),
                );
                self.deliver(trigger, message).await;
                return Ok(());
            }
            DocState::Charter(state) => state,
        };

        let group = subject.group()?;
        let trigger = MailTrigger::CharterStateChanged;
        let message = self.composer.charter_state_changed(
            doc,
            group,
            &event.desc,
            subject.addresses(trigger, none),
        );
        self.deliver(trigger, message).await;

        match to {
            CharterState::IntRev => {
                let text = self.charter_text(doc).await;
                let trigger = MailTrigger::CharterInternalReview;
                let message = self.composer.charter_internal_review(
                    doc,
                    group,
                    text.as_deref(),
                    subject.addresses(trigger, none),
                );
                self.deliver(trigger, message).await;
            }
            CharterState::ExtRev => {
                let text = self.charter_text(doc).await;
                let trigger = MailTrigger::CharterExternalReview;
                let message = self.composer.charter_external_review(
                    doc,
                    group,
                    text.as_deref(),
                    subject.addresses(trigger, none),
                );
                self.deliver(trigger, message).await;

                let trigger = MailTrigger::CharterExternalReviewNewWork;
                let message = self.composer.charter_new_work(
                    doc,
                    group,
                    text.as_deref(),
                    subject.addresses(trigger, none),
                );
                self.deliver(trigger, message).await;
            }
            CharterState::NotRev | CharterState::Approved => {
                let was_under_review = from
                    .and_then(|s| s.as_charter())
                    .is_some_and(|s| s.is_under_review());
                // Approval is logged at the approved revision; a dropped
                // recharter at its proposal revision.
                let abandoned = to == CharterState::NotRev || event.rev.is_proposal();
                if was_under_review && abandoned {
                    let trigger = MailTrigger::CharterAbandoned;
                    let message = self.composer.charter_abandoned(
                        doc,
                        group,
                        subject.addresses(trigger, none),
                    );
                    self.deliver(trigger, message).await;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl EventHandler for MailNotifier {
    async fn handle(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
        let event: DocEvent = envelope
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;

        match &event.kind {
            DocEventKind::ChangedState { from, to } => {
                self.on_state_changed(&event, *from, *to).await?;
            }
            DocEventKind::SentBallotAnnouncement { ballot_type, .. } => {
                let subject = self.subject(&event).await?;
                let trigger = MailTrigger::BallotIssued;
                let ctx = RecipientContext {
                    ballot_type: Some(*ballot_type),
                    ..RecipientContext::default()
                };
                let message =
                    self.composer
                        .ballot_issued(&subject.doc, *ballot_type, subject.addresses(trigger, ctx));
                self.deliver(trigger, message).await;
            }
            DocEventKind::IesgApproved => {
                let subject = self.subject(&event).await?;
                if !subject.doc.is_charter() {
                    return Ok(());
                }
                let group = subject.group()?;
                let text = self.charter_text(&subject.doc).await;
                let trigger = MailTrigger::BallotApprovedCharter;
                let message = self.composer.charter_approved(
                    &subject.doc,
                    group,
                    text.as_deref(),
                    subject.addresses(trigger, RecipientContext::default()),
                );
                self.deliver(trigger, message).await;
            }
            _ => {
                debug!(event_type = %envelope.event_type, "No notification for event");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MailNotifier"
    }
}
