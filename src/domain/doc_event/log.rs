//! Ordered view over a document's DocEvents.

use crate::domain::ballot::{Ballot, BallotType};
use crate::domain::foundation::{DocEventId, DocName};

use super::{DocEvent, DocEventKind, DocEventType};

/// All events of one document, ordered by `(time, id)`.
///
/// Queries walk the log newest-first, so "latest" always means the event
/// recorded last.
#[derive(Debug, Clone)]
pub struct DocEventLog {
    doc: DocName,
    events: Vec<DocEvent>,
}

impl DocEventLog {
    pub fn new(doc: DocName, mut events: Vec<DocEvent>) -> Self {
        events.retain(|e| e.doc == doc);
        events.sort_by(|a, b| a.time.cmp(&b.time).then(a.id.cmp(&b.id)));
        Self { doc, events }
    }

    pub fn doc(&self) -> &DocName {
        &self.doc
    }

    /// Appends a freshly stored event, keeping the order.
    pub fn record(&mut self, event: DocEvent) {
        let at = self
            .events
            .partition_point(|e| (e.time, e.id) <= (event.time, event.id));
        self.events.insert(at, event);
    }

    pub fn events(&self) -> &[DocEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn latest_event(&self, event_type: DocEventType) -> Option<&DocEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| e.event_type() == event_type)
    }

    pub fn latest_state_change(&self) -> Option<&DocEvent> {
        self.latest_event(DocEventType::ChangedState)
    }

    /// The `created_ballot` event of the open ballot of this type, if any.
    ///
    /// A ballot type is open when its most recent created/closed event is a
    /// creation.
    pub fn ballot_open(&self, ballot_type: BallotType) -> Option<&DocEvent> {
        self.events
            .iter()
            .rev()
            .find_map(|e| match &e.kind {
                DocEventKind::CreatedBallot { ballot_type: t } if *t == ballot_type => {
                    Some(Some(e))
                }
                DocEventKind::ClosedBallot { ballot_type: t, .. } if *t == ballot_type => {
                    Some(None)
                }
                _ => None,
            })
            .flatten()
    }

    /// Ballot types with an open ballot.
    pub fn open_ballots(&self) -> Vec<BallotType> {
        BallotType::ALL
            .iter()
            .copied()
            .filter(|t| self.ballot_open(*t).is_some())
            .collect()
    }

    /// The open ballot of this type, projected.
    pub fn open_ballot(&self, ballot_type: BallotType) -> Option<Ballot> {
        self.ballot_open(ballot_type).and_then(|e| self.ballot(e.id))
    }

    /// The ballot opened most recently, if it is still open.
    pub fn active_ballot(&self) -> Option<Ballot> {
        let latest = self.events.iter().rev().find(|e| {
            matches!(
                e.event_type(),
                DocEventType::CreatedBallot | DocEventType::ClosedBallot
            )
        })?;
        match latest.kind {
            DocEventKind::CreatedBallot { .. } => self.ballot(latest.id),
            _ => None,
        }
    }

    /// Projects the ballot opened by event `id`.
    pub fn ballot(&self, id: DocEventId) -> Option<Ballot> {
        let (start, opened) = self.events.iter().enumerate().find(|(_, e)| e.id == id)?;
        let DocEventKind::CreatedBallot { ballot_type } = opened.kind else {
            return None;
        };

        let mut ballot = Ballot::opened(opened, ballot_type);
        for event in &self.events[start + 1..] {
            match &event.kind {
                DocEventKind::ChangedBallotPosition(record) if record.ballot_id == id => {
                    ballot.apply_position(event, record);
                }
                DocEventKind::ClosedBallot { ballot_id, .. } if *ballot_id == id => {
                    ballot.close(event.time);
                }
                _ => {}
            }
        }
        Some(ballot)
    }

    /// Every ballot ever opened on the document, oldest first.
    pub fn ballots(&self) -> Vec<Ballot> {
        self.events
            .iter()
            .filter(|e| e.event_type() == DocEventType::CreatedBallot)
            .filter_map(|e| self.ballot(e.id))
            .collect()
    }
}
