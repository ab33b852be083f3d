//! Document aggregate.
//!
//! A document is either an Internet-Draft or a group charter. Its name never
//! changes; its revision only moves forward; its state moves through the
//! state machine matching its type.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DocName, DomainError, ErrorCode, GroupAcronym, PersonId, StateMachine, Timestamp,
};

use super::{CharterState, DocState, DocType, IesgState, Revision, StdLevel, Stream};

/// Maximum length for document titles.
pub const MAX_TITLE_LENGTH: usize = 1000;

/// Fields needed to register a new draft.
#[derive(Debug, Clone)]
pub struct NewDraft {
    pub name: DocName,
    pub title: String,
    pub group: Option<GroupAcronym>,
    pub stream: Stream,
    pub intended_std_level: Option<StdLevel>,
    pub ad: Option<PersonId>,
    pub notify: Vec<String>,
}

/// Document aggregate.
///
/// # Invariants
///
/// - `name` is immutable
/// - `rev` only increases (drafts by one, charters per the charter rules)
/// - `state` belongs to the state machine of `doc_type`
/// - charters always have a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: DocName,
    doc_type: DocType,
    title: String,
    rev: Revision,
    state: DocState,
    group: Option<GroupAcronym>,
    stream: Stream,
    ad: Option<PersonId>,
    notify: Vec<String>,
    intended_std_level: Option<StdLevel>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Document {
    /// Creates a draft at revision `00` in state `idexists`.
    pub fn new_draft(draft: NewDraft) -> Result<Self, DomainError> {
        if !draft.name.as_str().starts_with("draft-") {
            return Err(DomainError::validation(
                "name",
                format!("'{}' is not a draft name", draft.name),
            ));
        }
        let title = Self::validate_title(draft.title)?;

        let now = Timestamp::now();
        Ok(Self {
            name: draft.name,
            doc_type: DocType::Draft,
            title,
            rev: Revision::initial_draft(),
            state: DocState::DraftIesg(IesgState::IdExists),
            group: draft.group,
            stream: draft.stream,
            ad: draft.ad,
            notify: clean_notify(draft.notify),
            intended_std_level: draft.intended_std_level,
            created_at: now,
            updated_at: now,
        })
    }

    /// Creates a charter at revision `00-00` in state `notrev`.
    pub fn new_charter(
        name: DocName,
        group: GroupAcronym,
        title: String,
        stream: Stream,
    ) -> Result<Self, DomainError> {
        if !name.as_str().starts_with("charter-") {
            return Err(DomainError::validation(
                "name",
                format!("'{}' is not a charter name", name),
            ));
        }
        let title = Self::validate_title(title)?;

        let now = Timestamp::now();
        Ok(Self {
            name,
            doc_type: DocType::Charter,
            title,
            rev: Revision::initial_charter(),
            state: DocState::Charter(CharterState::NotRev),
            group: Some(group),
            stream,
            ad: None,
            notify: Vec::new(),
            intended_std_level: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a document from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        name: DocName,
        doc_type: DocType,
        title: String,
        rev: Revision,
        state: DocState,
        group: Option<GroupAcronym>,
        stream: Stream,
        ad: Option<PersonId>,
        notify: Vec<String>,
        intended_std_level: Option<StdLevel>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            name,
            doc_type,
            title,
            rev,
            state,
            group,
            stream,
            ad,
            notify,
            intended_std_level,
            created_at,
            updated_at,
        }
    }

    // Accessors

    pub fn name(&self) -> &DocName {
        &self.name
    }

    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rev(&self) -> Revision {
        self.rev
    }

    pub fn state(&self) -> DocState {
        self.state
    }

    /// IESG state, for drafts.
    pub fn iesg_state(&self) -> Option<IesgState> {
        self.state.as_iesg()
    }

    /// Charter state, for charters.
    pub fn charter_state(&self) -> Option<CharterState> {
        self.state.as_charter()
    }

    pub fn group(&self) -> Option<&GroupAcronym> {
        self.group.as_ref()
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    /// Responsible area director.
    pub fn ad(&self) -> Option<&PersonId> {
        self.ad.as_ref()
    }

    /// Addresses that asked to be told about changes.
    pub fn notify(&self) -> &[String] {
        &self.notify
    }

    pub fn intended_std_level(&self) -> Option<StdLevel> {
        self.intended_std_level
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// `<name>-<rev>`, as used in file names and mail subjects.
    pub fn name_with_rev(&self) -> String {
        format!("{}-{}", self.name, self.rev)
    }

    pub fn is_charter(&self) -> bool {
        self.doc_type == DocType::Charter
    }

    // Mutations

    /// Moves the document to a new revision.
    ///
    /// Drafts only accept the next draft revision. Charters accept the next
    /// proposal revision or the next approved revision. Returns the previous
    /// revision.
    pub fn set_revision(&mut self, rev: Revision) -> Result<Revision, DomainError> {
        if rev <= self.rev {
            return Err(DomainError::new(
                ErrorCode::InvalidRevision,
                format!("revision {} does not follow {}", rev, self.rev),
            ));
        }

        let allowed: Vec<Revision> = match self.doc_type {
            DocType::Draft => vec![self.rev.next_draft().ok()],
            DocType::Charter => vec![self.rev.next_charter().ok(), self.rev.next_approved().ok()],
        }
        .into_iter()
        .flatten()
        .collect();
        if !allowed.contains(&rev) {
            return Err(DomainError::new(
                ErrorCode::InvalidRevision,
                format!(
                    "revision {} is not a valid successor of {} for a {}",
                    rev,
                    self.rev,
                    self.doc_type.slug()
                ),
            ));
        }

        let previous = self.rev;
        self.rev = rev;
        self.touch();
        Ok(previous)
    }

    /// Moves a draft to a new IESG state. Returns the previous state.
    pub fn set_iesg_state(&mut self, target: IesgState) -> Result<IesgState, DomainError> {
        let current = self.iesg_state().ok_or_else(|| self.wrong_type(DocType::Draft))?;
        let next = current.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("cannot move {} from {} to {}", self.name, current, target),
            )
        })?;
        self.state = DocState::DraftIesg(next);
        self.touch();
        Ok(current)
    }

    /// Moves a charter to a new charter state. Returns the previous state.
    pub fn set_charter_state(&mut self, target: CharterState) -> Result<CharterState, DomainError> {
        let current = self
            .charter_state()
            .ok_or_else(|| self.wrong_type(DocType::Charter))?;
        let next = current.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("cannot move {} from {} to {}", self.name, current, target),
            )
        })?;
        self.state = DocState::Charter(next);
        self.touch();
        Ok(current)
    }

    /// Drops an abandoned recharter proposal, returning the charter to its
    /// last approved revision in `approved`.
    ///
    /// Returns the state the charter was in.
    pub fn revert_to_approved_charter(&mut self) -> Result<CharterState, DomainError> {
        let current = self
            .charter_state()
            .ok_or_else(|| self.wrong_type(DocType::Charter))?;
        if !current.is_under_review() || self.rev.major() == 0 {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("{} has no approved charter to return to", self.name),
            ));
        }
        self.rev = self.rev.approved();
        self.state = DocState::Charter(CharterState::Approved);
        self.touch();
        Ok(current)
    }

    pub fn set_title(&mut self, title: String) -> Result<(), DomainError> {
        self.title = Self::validate_title(title)?;
        self.touch();
        Ok(())
    }

    /// Ensures the document is of the given type.
    pub fn ensure_type(&self, doc_type: DocType) -> Result<(), DomainError> {
        if self.doc_type != doc_type {
            return Err(self.wrong_type(doc_type));
        }
        Ok(())
    }

    fn wrong_type(&self, expected: DocType) -> DomainError {
        DomainError::new(
            ErrorCode::WrongDocumentType,
            format!("{} is not a {}", self.name, expected.slug()),
        )
        .with_detail("doc", self.name.as_str())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_title(title: String) -> Result<String, DomainError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title cannot exceed {} characters", MAX_TITLE_LENGTH),
            ));
        }
        Ok(title)
    }
}

fn clean_notify(notify: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = notify
        .into_iter()
        .map(|address| address.trim().to_string())
        .filter(|address| !address.is_empty())
        .collect();
    cleaned.dedup();
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Document {
        Document::new_draft(NewDraft {
            name: DocName::new("draft-ietf-foo-bar").unwrap(),
            title: "Foo over Bar".to_string(),
            group: Some(GroupAcronym::new("foo").unwrap()),
            stream: Stream::Ietf,
            intended_std_level: Some(StdLevel::Ps),
            ad: None,
            notify: vec![" foo-chairs@ietf.org ".to_string(), String::new()],
        })
        .unwrap()
    }

    fn charter() -> Document {
        Document::new_charter(
            DocName::new("charter-ietf-foo").unwrap(),
            GroupAcronym::new("foo").unwrap(),
            "Charter for Foo".to_string(),
            Stream::Ietf,
        )
        .unwrap()
    }

    fn rev(s: &str) -> Revision {
        Revision::parse(s).unwrap()
    }

    #[test]
    fn new_draft_starts_at_00_in_idexists() {
        let doc = draft();
        assert_eq!(doc.rev(), rev("00"));
        assert_eq!(doc.iesg_state(), Some(IesgState::IdExists));
        assert_eq!(doc.charter_state(), None);
        assert_eq!(doc.notify(), ["foo-chairs@ietf.org".to_string()]);
        assert_eq!(doc.name_with_rev(), "draft-ietf-foo-bar-00");
    }

    #[test]
    fn new_draft_rejects_non_draft_names_and_empty_titles() {
        let mut fields = NewDraft {
            name: DocName::new("charter-ietf-foo").unwrap(),
            title: "Title".to_string(),
            group: None,
            stream: Stream::Ietf,
            intended_std_level: None,
            ad: None,
            notify: vec![],
        };
        assert!(Document::new_draft(fields.clone()).is_err());

        fields.name = DocName::new("draft-foo").unwrap();
        fields.title = "   ".to_string();
        let err = Document::new_draft(fields).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn new_charter_starts_at_00_00_in_notrev() {
        let doc = charter();
        assert!(doc.is_charter());
        assert_eq!(doc.rev(), rev("00-00"));
        assert_eq!(doc.charter_state(), Some(CharterState::NotRev));
        assert_eq!(doc.group().map(|g| g.as_str()), Some("foo"));
    }

    #[test]
    fn draft_revision_must_be_exactly_next() {
        let mut doc = draft();
        assert_eq!(doc.set_revision(rev("01")).unwrap(), rev("00"));
        assert_eq!(doc.rev(), rev("01"));

        let err = doc.set_revision(rev("03")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRevision);
        let err = doc.set_revision(rev("01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRevision);
    }

    #[test]
    fn charter_revision_accepts_next_proposal_or_next_approval() {
        let mut doc = charter();
        doc.set_revision(rev("00-01")).unwrap();
        doc.set_revision(rev("01")).unwrap();
        doc.set_revision(rev("01-00")).unwrap();
        assert_eq!(doc.rev(), rev("01-00"));

        assert!(doc.set_revision(rev("01-02")).is_err());
        assert!(doc.set_revision(rev("00-05")).is_err());
    }

    #[test]
    fn abandoned_recharter_reverts_to_approved_revision() {
        let mut doc = charter();
        doc.set_charter_state(CharterState::IntRev).unwrap();
        assert_eq!(
            doc.revert_to_approved_charter().unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );

        doc.set_revision(rev("01")).unwrap();
        doc.set_revision(rev("01-00")).unwrap();
        doc.set_revision(rev("01-01")).unwrap();
        assert_eq!(doc.revert_to_approved_charter().unwrap(), CharterState::IntRev);
        assert_eq!(doc.rev(), rev("01"));
        assert_eq!(doc.charter_state(), Some(CharterState::Approved));

        assert!(doc.revert_to_approved_charter().is_err());
    }

    #[test]
    fn iesg_state_follows_state_machine() {
        let mut doc = draft();
        assert_eq!(
            doc.set_iesg_state(IesgState::PubReq).unwrap(),
            IesgState::IdExists
        );
        let err = doc.set_iesg_state(IesgState::Approved).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(doc.iesg_state(), Some(IesgState::PubReq));
    }

    #[test]
    fn state_setters_reject_the_wrong_document_type() {
        let mut doc = draft();
        let err = doc.set_charter_state(CharterState::InfRev).unwrap_err();
        assert_eq!(err.code, ErrorCode::WrongDocumentType);

        let mut doc = charter();
        let err = doc.set_iesg_state(IesgState::PubReq).unwrap_err();
        assert_eq!(err.code, ErrorCode::WrongDocumentType);
        assert!(doc.set_charter_state(CharterState::InfRev).is_ok());
    }

    #[test]
    fn serializes_with_tagged_state() {
        let json = serde_json::to_value(charter()).unwrap();
        assert_eq!(json["rev"], "00-00");
        assert_eq!(json["state"]["state_type"], "charter");
        assert_eq!(json["doc_type"], "charter");
    }
}
