//! Ballot open/close rules.
//!
//! These functions decide which events a ballot operation appends. They
//! never touch storage; callers append the returned events in order.

use crate::domain::doc_event::{DocEventKind, DocEventLog, NewDocEvent};
use crate::domain::document::{DocType, Document};
use crate::domain::foundation::{DomainError, ErrorCode, PersonId};

use super::BallotType;

fn ensure_applies(doc: &Document, ballot_type: BallotType) -> Result<(), DomainError> {
    if ballot_type.doc_type() != doc.doc_type() {
        return Err(DomainError::new(
            ErrorCode::WrongDocumentType,
            format!(
                "a {} ballot cannot be opened on {}",
                ballot_type.slug(),
                doc.name()
            ),
        ));
    }
    if doc.doc_type() == DocType::Draft
        && BallotType::draft_approval_for(doc.stream()) != Some(ballot_type)
    {
        return Err(DomainError::new(
            ErrorCode::WrongDocumentType,
            format!(
                "{} stream drafts are not balloted with {}",
                doc.stream(),
                ballot_type.slug()
            ),
        )
        .with_detail("doc", doc.name().as_str()));
    }
    Ok(())
}

fn created(doc: &Document, by: PersonId, ballot_type: BallotType) -> NewDocEvent {
    NewDocEvent::new(
        doc.name().clone(),
        doc.rev(),
        by,
        format!("Created \"{}\" ballot", ballot_type.name()),
        DocEventKind::CreatedBallot { ballot_type },
    )
}

/// Opens a ballot unless one of this type is already open.
pub fn create_ballot_if_not_open(
    log: &DocEventLog,
    doc: &Document,
    by: PersonId,
    ballot_type: BallotType,
) -> Result<Option<NewDocEvent>, DomainError> {
    ensure_applies(doc, ballot_type)?;
    if log.ballot_open(ballot_type).is_some() {
        return Ok(None);
    }
    Ok(Some(created(doc, by, ballot_type)))
}

/// Closes every open ballot, then opens a fresh one of `ballot_type`.
pub fn create_ballot(
    log: &DocEventLog,
    doc: &Document,
    by: PersonId,
    ballot_type: BallotType,
) -> Result<Vec<NewDocEvent>, DomainError> {
    ensure_applies(doc, ballot_type)?;
    let mut events = close_open_ballots(log, doc, by);
    events.push(created(doc, by, ballot_type));
    Ok(events)
}

/// Closes the open ballot of `ballot_type`, if there is one.
pub fn close_ballot(
    log: &DocEventLog,
    doc: &Document,
    by: PersonId,
    ballot_type: BallotType,
) -> Option<NewDocEvent> {
    let opened = log.ballot_open(ballot_type)?;
    Some(NewDocEvent::new(
        doc.name().clone(),
        doc.rev(),
        by,
        format!("Closed \"{}\" ballot", ballot_type.name()),
        DocEventKind::ClosedBallot {
            ballot_type,
            ballot_id: opened.id,
        },
    ))
}

/// Closes every open ballot on the document.
pub fn close_open_ballots(log: &DocEventLog, doc: &Document, by: PersonId) -> Vec<NewDocEvent> {
    log.open_ballots()
        .into_iter()
        .filter_map(|t| close_ballot(log, doc, by, t))
        .collect()
}
