//! Chartering steps shared by the charter handlers.

use std::sync::Arc;

use crate::application::support::DocEventRecorder;
use crate::domain::ballot::{close_ballot, create_ballot_if_not_open, BallotType};
use crate::domain::charter::is_recharter;
use crate::domain::doc_event::{DocEvent, DocEventKind, DocEventLog, NewDocEvent};
use crate::domain::document::{CharterState, DocState, Document, DocumentError, Revision};
use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::group::{copy_active_to_charter, Group, GroupEvent, GroupState};
use crate::ports::{CharterTextStorage, DocumentRepository, GroupRepository};

pub(super) struct CharterWorkflow {
    pub documents: Arc<dyn DocumentRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub texts: Arc<dyn CharterTextStorage>,
    pub recorder: DocEventRecorder,
}

/// What a chartering step appended.
pub(super) struct Step {
    pub document: Document,
    pub events: Vec<DocEvent>,
}

impl CharterWorkflow {
    /// Starts a (re)chartering effort into `infrev` or `intrev`.
    ///
    /// Creates the charter when the group has none yet.
    pub async fn start(
        &self,
        group: &mut Group,
        existing: Option<Document>,
        target: CharterState,
        without_external_review: bool,
        by: PersonId,
    ) -> Result<Step, DocumentError> {
        if !matches!(target, CharterState::InfRev | CharterState::IntRev) {
            return Err(DocumentError::validation(
                "state",
                format!("chartering starts in infrev or intrev, not {}", target.slug()),
            ));
        }

        let mut document = match existing {
            Some(doc) => {
                let current = doc.charter_state().unwrap_or_default();
                if !current.can_start_chartering() {
                    return Err(DocumentError::invalid_state(format!(
                        "{} is already under review ({})",
                        doc.name(),
                        current.slug()
                    )));
                }
                doc
            }
            None => self.create_charter(group).await?,
        };
        let mut log = self.recorder.log_for(document.name()).await?;
        let mut events = Vec::new();

        if matches!(
            group.state(),
            GroupState::Bof | GroupState::Unknown | GroupState::Abandon
        ) {
            self.set_group_state(group, GroupState::Proposed, by).await?;
        }

        if document.charter_state() == Some(CharterState::Approved) {
            let next = document.rev().next_charter()?;
            self.copy_text_if_present(&document, next).await?;
            document.set_revision(next)?;
            events.push(self.new_revision(&mut log, &document, by).await?);
        }

        let milestones = self.groups.milestones(group.acronym()).await?;
        for copy in copy_active_to_charter(&milestones) {
            self.groups.save_milestone(&copy).await?;
        }

        let previous = document.set_charter_state(target)?;
        self.documents.update(&document).await?;
        events.push(self.changed_state(&mut log, &document, previous, target, by).await?);

        if target == CharterState::IntRev {
            let ballot_type = review_ballot(&document, without_external_review);
            if let Some(opened) = create_ballot_if_not_open(&log, &document, by, ballot_type)? {
                events.push(self.recorder.record(&mut log, opened).await?);
            }
        }

        tracing::info!(
            doc = %document.name(),
            rev = %document.rev(),
            state = target.slug(),
            "Chartering started"
        );
        Ok(Step { document, events })
    }

    async fn create_charter(&self, group: &mut Group) -> Result<Document, DocumentError> {
        if !group.group_type().is_chartered() {
            return Err(DocumentError::validation(
                "group",
                format!("{} groups do not have charters", group.group_type().label()),
            ));
        }
        let name = group.charter_name()?;
        let document = Document::new_charter(
            name.clone(),
            group.acronym().clone(),
            group.name().to_string(),
            group.charter_stream(),
        )?;
        self.documents.save(&document).await?;
        group.attach_charter(name)?;
        self.groups.update(group).await?;
        tracing::info!(doc = %document.name(), group = %group.acronym(), "Charter created");
        Ok(document)
    }

    pub async fn set_group_state(
        &self,
        group: &mut Group,
        state: GroupState,
        by: PersonId,
    ) -> Result<(), DocumentError> {
        if let Some(previous) = group.set_state(state) {
            self.groups.update(group).await?;
            self.groups
                .append_event(&GroupEvent::changed_state(group.acronym().clone(), by, previous, state))
                .await?;
        }
        Ok(())
    }

    /// Copies the current revision's text, if any, to `next`.
    pub async fn copy_text_if_present(
        &self,
        document: &Document,
        next: Revision,
    ) -> Result<bool, DocumentError> {
        let name = document.name();
        if !self.texts.exists(name, document.rev()).await.map_err(DomainError::from)? {
            return Ok(false);
        }
        let text = self
            .texts
            .read(name, document.rev())
            .await
            .map_err(DomainError::from)?;
        self.texts
            .write(name, next, &text)
            .await
            .map_err(DomainError::from)?;
        Ok(true)
    }

    pub async fn new_revision(
        &self,
        log: &mut DocEventLog,
        document: &Document,
        by: PersonId,
    ) -> Result<DocEvent, DocumentError> {
        Ok(self
            .recorder
            .record(
                log,
                NewDocEvent::new(
                    document.name().clone(),
                    document.rev(),
                    by,
                    format!("New version available: {}.txt", document.name_with_rev()),
                    DocEventKind::NewRevision,
                ),
            )
            .await?)
    }

    pub async fn changed_state(
        &self,
        log: &mut DocEventLog,
        document: &Document,
        from: CharterState,
        to: CharterState,
        by: PersonId,
    ) -> Result<DocEvent, DocumentError> {
        Ok(self
            .recorder
            .record(
                log,
                NewDocEvent::new(
                    document.name().clone(),
                    document.rev(),
                    by,
                    format!("State changed to {} from {}", to, from),
                    DocEventKind::ChangedState {
                        from: Some(DocState::Charter(from)),
                        to: DocState::Charter(to),
                    },
                ),
            )
            .await?)
    }

    /// Closes whichever internal review ballot is open.
    pub async fn close_review_ballots(
        &self,
        log: &mut DocEventLog,
        document: &Document,
        by: PersonId,
    ) -> Result<Vec<DocEvent>, DocumentError> {
        let closing: Vec<NewDocEvent> = [
            BallotType::CharterExternalReview,
            BallotType::CharterWithoutExternalReview,
        ]
        .into_iter()
        .filter_map(|t| close_ballot(log, document, by, t))
        .collect();
        Ok(self.recorder.record_all(log, closing).await?)
    }
}

/// Internal review ballot: `r-wo-ext` only when rechartering without
/// external review.
pub(super) fn review_ballot(document: &Document, without_external_review: bool) -> BallotType {
    if without_external_review && is_recharter(document.rev()) {
        BallotType::CharterWithoutExternalReview
    } else {
        BallotType::CharterExternalReview
    }
}
