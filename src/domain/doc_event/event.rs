//! DocEvent records.
//!
//! Every change to a document appends one of these. The log is the audit
//! trail and the source of ballot projections.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ballot::{BallotType, PositionName};
use crate::domain::document::{DocState, Revision};
use crate::domain::foundation::{DocEventId, DocName, DomainEvent, PersonId, Timestamp};

/// Discriminant of [`DocEventKind`], used for "latest event of type" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocEventType {
    ChangedState,
    NewRevision,
    CreatedBallot,
    ClosedBallot,
    ChangedBallotPosition,
    SentBallotAnnouncement,
    IesgApproved,
    AddedComment,
}

impl DocEventType {
    pub fn slug(&self) -> &'static str {
        match self {
            DocEventType::ChangedState => "changed_state",
            DocEventType::NewRevision => "new_revision",
            DocEventType::CreatedBallot => "created_ballot",
            DocEventType::ClosedBallot => "closed_ballot",
            DocEventType::ChangedBallotPosition => "changed_ballot_position",
            DocEventType::SentBallotAnnouncement => "sent_ballot_announcement",
            DocEventType::IesgApproved => "iesg_approved",
            DocEventType::AddedComment => "added_comment",
        }
    }
}

impl fmt::Display for DocEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// A balloter's position as recorded on a `changed_ballot_position` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub ballot_id: DocEventId,
    pub ballot_type: BallotType,
    pub balloter: PersonId,
    pub pos: PositionName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<PositionName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discuss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discuss_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_time: Option<Timestamp>,
}

/// Typed payload of a DocEvent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocEventKind {
    ChangedState {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<DocState>,
        to: DocState,
    },
    NewRevision,
    CreatedBallot {
        ballot_type: BallotType,
    },
    ClosedBallot {
        ballot_type: BallotType,
        ballot_id: DocEventId,
    },
    ChangedBallotPosition(PositionRecord),
    SentBallotAnnouncement {
        ballot_type: BallotType,
        ballot_id: DocEventId,
    },
    IesgApproved,
    AddedComment,
}

impl DocEventKind {
    pub fn event_type(&self) -> DocEventType {
        match self {
            DocEventKind::ChangedState { .. } => DocEventType::ChangedState,
            DocEventKind::NewRevision => DocEventType::NewRevision,
            DocEventKind::CreatedBallot { .. } => DocEventType::CreatedBallot,
            DocEventKind::ClosedBallot { .. } => DocEventType::ClosedBallot,
            DocEventKind::ChangedBallotPosition(_) => DocEventType::ChangedBallotPosition,
            DocEventKind::SentBallotAnnouncement { .. } => DocEventType::SentBallotAnnouncement,
            DocEventKind::IesgApproved => DocEventType::IesgApproved,
            DocEventKind::AddedComment => DocEventType::AddedComment,
        }
    }
}

/// An event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocEvent {
    pub doc: DocName,
    pub rev: Revision,
    pub time: Timestamp,
    pub by: PersonId,
    pub desc: String,
    pub kind: DocEventKind,
}

impl NewDocEvent {
    pub fn new(
        doc: DocName,
        rev: Revision,
        by: PersonId,
        desc: impl Into<String>,
        kind: DocEventKind,
    ) -> Self {
        Self {
            doc,
            rev,
            time: Timestamp::now(),
            by,
            desc: desc.into(),
            kind,
        }
    }

    /// Attaches the store-assigned id.
    pub fn into_event(self, id: DocEventId) -> DocEvent {
        DocEvent {
            id,
            doc: self.doc,
            rev: self.rev,
            time: self.time,
            by: self.by,
            desc: self.desc,
            kind: self.kind,
        }
    }
}

/// A stored DocEvent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEvent {
    pub id: DocEventId,
    pub doc: DocName,
    pub rev: Revision,
    pub time: Timestamp,
    pub by: PersonId,
    pub desc: String,
    pub kind: DocEventKind,
}

impl DocEvent {
    pub fn event_type(&self) -> DocEventType {
        self.kind.event_type()
    }

    pub fn position(&self) -> Option<&PositionRecord> {
        match &self.kind {
            DocEventKind::ChangedBallotPosition(record) => Some(record),
            _ => None,
        }
    }
}

impl DomainEvent for DocEvent {
    fn event_type(&self) -> &'static str {
        match self.kind.event_type() {
            DocEventType::ChangedState => "doc.changed_state.v1",
            DocEventType::NewRevision => "doc.new_revision.v1",
            DocEventType::CreatedBallot => "doc.created_ballot.v1",
            DocEventType::ClosedBallot => "doc.closed_ballot.v1",
            DocEventType::ChangedBallotPosition => "doc.changed_ballot_position.v1",
            DocEventType::SentBallotAnnouncement => "doc.sent_ballot_announcement.v1",
            DocEventType::IesgApproved => "doc.iesg_approved.v1",
            DocEventType::AddedComment => "doc.added_comment.v1",
        }
    }

    fn aggregate_id(&self) -> String {
        self.doc.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Document"
    }

    fn occurred_at(&self) -> Timestamp {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::CharterState;
    use crate::domain::foundation::EventEnvelope;

    fn changed_state() -> DocEvent {
        NewDocEvent::new(
            DocName::new("charter-ietf-foo").unwrap(),
            Revision::initial_charter(),
            PersonId::new(),
            "State changed to Draft Charter from Not currently under review",
            DocEventKind::ChangedState {
                from: Some(DocState::Charter(CharterState::NotRev)),
                to: DocState::Charter(CharterState::InfRev),
            },
        )
        .into_event(DocEventId::from_raw(7))
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let json = serde_json::to_value(&changed_state().kind).unwrap();
        assert_eq!(json["type"], "changed_state");
        assert_eq!(json["to"]["state"], "infrev");
    }

    #[test]
    fn envelope_uses_versioned_event_type() {
        let event = changed_state();
        let envelope = EventEnvelope::from_event(&event).unwrap();
        assert_eq!(envelope.event_type, "doc.changed_state.v1");
        assert_eq!(envelope.aggregate_id, "charter-ietf-foo");
        assert_eq!(envelope.aggregate_type, "Document");

        let back: DocEvent = envelope.payload_as().unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn position_accessor_only_matches_position_events() {
        assert!(changed_state().position().is_none());
        assert_eq!(changed_state().event_type(), DocEventType::ChangedState);
    }
}
