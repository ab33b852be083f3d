//! Ballot projection built from the DocEvent log.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::doc_event::{DocEvent, PositionRecord};
use crate::domain::document::Revision;
use crate::domain::foundation::{DocEventId, DocName, PersonId, Timestamp};

use super::{BallotType, PositionName};

/// Latest position of one balloter on one ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BallotPosition {
    pub balloter: PersonId,
    pub pos: PositionName,
    pub discuss: Option<String>,
    pub discuss_time: Option<Timestamp>,
    pub comment: Option<String>,
    pub comment_time: Option<Timestamp>,
    pub time: Timestamp,
    pub event_id: DocEventId,
}

impl BallotPosition {
    fn from_record(event: &DocEvent, record: &PositionRecord) -> Self {
        Self {
            balloter: record.balloter,
            pos: record.pos,
            discuss: record.discuss.clone(),
            discuss_time: record.discuss_time,
            comment: record.comment.clone(),
            comment_time: record.comment_time,
            time: event.time,
            event_id: event.id,
        }
    }
}

/// A ballot: opened by a `created_ballot` event, optionally closed later.
///
/// The ballot id is the id of the event that opened it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ballot {
    id: DocEventId,
    doc: DocName,
    ballot_type: BallotType,
    rev: Revision,
    opened_at: Timestamp,
    opened_by: PersonId,
    closed_at: Option<Timestamp>,
    positions: BTreeMap<PersonId, BallotPosition>,
}

impl Ballot {
    /// Starts a projection from the `created_ballot` event.
    pub(crate) fn opened(event: &DocEvent, ballot_type: BallotType) -> Self {
        Self {
            id: event.id,
            doc: event.doc.clone(),
            ballot_type,
            rev: event.rev,
            opened_at: event.time,
            opened_by: event.by,
            closed_at: None,
            positions: BTreeMap::new(),
        }
    }

    /// Applies a later event belonging to this ballot.
    pub(crate) fn apply_position(&mut self, event: &DocEvent, record: &PositionRecord) {
        self.positions
            .insert(record.balloter, BallotPosition::from_record(event, record));
    }

    pub(crate) fn close(&mut self, at: Timestamp) {
        if self.closed_at.is_none() {
            self.closed_at = Some(at);
        }
    }

    pub fn id(&self) -> DocEventId {
        self.id
    }

    pub fn doc(&self) -> &DocName {
        &self.doc
    }

    pub fn ballot_type(&self) -> BallotType {
        self.ballot_type
    }

    /// Revision the ballot was opened on.
    pub fn rev(&self) -> Revision {
        self.rev
    }

    pub fn opened_at(&self) -> &Timestamp {
        &self.opened_at
    }

    pub fn opened_by(&self) -> &PersonId {
        &self.opened_by
    }

    pub fn closed_at(&self) -> Option<&Timestamp> {
        self.closed_at.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    pub fn position_of(&self, balloter: &PersonId) -> Option<&BallotPosition> {
        self.positions.get(balloter)
    }

    /// Current positions, one per balloter.
    pub fn positions(&self) -> impl Iterator<Item = &BallotPosition> {
        self.positions.values()
    }

    /// Positions that currently block the ballot.
    pub fn blocking_positions(&self) -> impl Iterator<Item = &BallotPosition> {
        self.positions().filter(|p| p.pos.is_blocking())
    }
}
