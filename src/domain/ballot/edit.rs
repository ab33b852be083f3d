//! Rules for recording a balloter's position.

use crate::domain::doc_event::{DocEventKind, NewDocEvent, PositionRecord};
use crate::domain::document::Document;
use crate::domain::foundation::{DomainError, ErrorCode, PersonId, Timestamp};

use super::{Ballot, PositionName};

/// A balloter's submitted position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSubmission {
    pub balloter: PersonId,
    pub balloter_name: String,
    pub pos: PositionName,
    pub discuss: Option<String>,
    pub comment: Option<String>,
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Works out the `changed_ballot_position` event for a submission.
///
/// Returns `None` when the submission changes nothing. `by` is whoever
/// entered the position, which may be a secretary acting for the balloter.
pub fn plan_position_change(
    ballot: &Ballot,
    doc: &Document,
    submission: PositionSubmission,
    by: PersonId,
) -> Result<Option<NewDocEvent>, DomainError> {
    if !ballot.is_open() {
        return Err(DomainError::new(
            ErrorCode::BallotClosed,
            format!("the {} ballot on {} is closed", ballot.ballot_type().slug(), doc.name()),
        ));
    }
    let ballot_type = ballot.ballot_type();
    if !ballot_type.allows(submission.pos) {
        return Err(DomainError::validation(
            "position",
            format!(
                "'{}' is not a valid position on a {} ballot",
                submission.pos.slug(),
                ballot_type.slug()
            ),
        ));
    }

    let discuss = non_empty(submission.discuss);
    let discuss = if submission.pos.is_blocking() {
        if discuss.is_none() {
            return Err(DomainError::validation(
                "discuss",
                format!("a {} position needs an explanation", submission.pos.name()),
            ));
        }
        discuss
    } else {
        None
    };
    let comment = non_empty(submission.comment);

    let old = ballot.position_of(&submission.balloter);
    let previous = old.map(|p| p.pos);
    let old_discuss = old.and_then(|p| p.discuss.clone());
    let old_comment = old.and_then(|p| p.comment.clone());

    let pos_changed = previous != Some(submission.pos);
    let discuss_changed = discuss != old_discuss;
    let comment_changed = comment != old_comment;
    if !pos_changed && !discuss_changed && !comment_changed {
        return Ok(None);
    }

    let now = Timestamp::now();
    let discuss_time = if discuss_changed {
        discuss.as_ref().map(|_| now)
    } else {
        old.and_then(|p| p.discuss_time)
    };
    let comment_time = if comment_changed {
        comment.as_ref().map(|_| now)
    } else {
        old.and_then(|p| p.comment_time)
    };

    let mut parts = Vec::new();
    match previous {
        None => parts.push(format!(
            "[Ballot Position Update] New position, {}, has been recorded for {}",
            submission.pos.name(),
            submission.balloter_name
        )),
        Some(prev) if pos_changed => parts.push(format!(
            "[Ballot Position Update] Position for {} has been changed to {} from {}",
            submission.balloter_name,
            submission.pos.name(),
            prev.name()
        )),
        Some(_) => {}
    }
    if let (true, Some(text)) = (discuss_changed, discuss.as_ref()) {
        parts.push(format!("[Ballot {}]\n{}", submission.pos.slug(), text));
    }
    if let (true, Some(text)) = (comment_changed, comment.as_ref()) {
        parts.push(format!("[Ballot comment]\n{}", text));
    }
    if parts.is_empty() {
        parts.push(format!(
            "[Ballot Position Update] Position for {} has been updated",
            submission.balloter_name
        ));
    }

    Ok(Some(NewDocEvent::new(
        doc.name().clone(),
        doc.rev(),
        by,
        parts.join("\n\n"),
        DocEventKind::ChangedBallotPosition(PositionRecord {
            ballot_id: ballot.id(),
            ballot_type,
            balloter: submission.balloter,
            pos: submission.pos,
            previous,
            discuss,
            discuss_time,
            comment,
            comment_time,
        }),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ballot::{create_ballot_if_not_open, BallotType};
    use crate::domain::doc_event::DocEventLog;
    use crate::domain::document::{NewDraft, StdLevel, Stream};
    use crate::domain::foundation::{DocEventId, DocName};

    struct Fixture {
        doc: Document,
        log: DocEventLog,
        ballot_id: DocEventId,
        ad: PersonId,
    }

    impl Fixture {
        fn new() -> Self {
            let doc = Document::new_draft(NewDraft {
                name: DocName::new("draft-ietf-foo-bar").unwrap(),
                title: "Foo".to_string(),
                group: None,
                stream: Stream::Ietf,
                intended_std_level: Some(StdLevel::Ps),
                ad: None,
                notify: vec![],
            })
            .unwrap();
            let mut log = DocEventLog::new(doc.name().clone(), vec![]);
            let ad = PersonId::new();
            let created = create_ballot_if_not_open(&log, &doc, ad, BallotType::DraftApprove)
                .unwrap()
                .unwrap();
            let ballot_id = DocEventId::from_raw(1);
            log.record(created.into_event(ballot_id));
            Self {
                doc,
                log,
                ballot_id,
                ad,
            }
        }

        fn ballot(&self) -> Ballot {
            self.log.ballot(self.ballot_id).unwrap()
        }

        fn submit(
            &mut self,
            pos: PositionName,
            discuss: Option<&str>,
            comment: Option<&str>,
        ) -> Result<Option<NewDocEvent>, DomainError> {
            let planned = plan_position_change(
                &self.ballot(),
                &self.doc,
                PositionSubmission {
                    balloter: self.ad,
                    balloter_name: "Alice Area".to_string(),
                    pos,
                    discuss: discuss.map(str::to_string),
                    comment: comment.map(str::to_string),
                },
                self.ad,
            )?;
            if let Some(event) = planned.clone() {
                let id = DocEventId::from_raw(self.log.len() as i64 + 1);
                self.log.record(event.into_event(id));
            }
            Ok(planned)
        }
    }

    #[test]
    fn first_position_is_recorded_as_new() {
        let mut f = Fixture::new();
        let event = f.submit(PositionName::Yes, None, None).unwrap().unwrap();
        assert_eq!(
            event.desc,
            "[Ballot Position Update] New position, Yes, has been recorded for Alice Area"
        );
        assert_eq!(f.ballot().position_of(&f.ad).unwrap().pos, PositionName::Yes);
    }

    #[test]
    fn change_mentions_previous_position() {
        let mut f = Fixture::new();
        f.submit(PositionName::Discuss, Some("Section 3 is unclear"), None)
            .unwrap();
        let event = f.submit(PositionName::NoObj, None, None).unwrap().unwrap();
        assert!(event.desc.starts_with(
            "[Ballot Position Update] Position for Alice Area has been changed to No Objection from Discuss"
        ));
        let position = f.ballot().position_of(&f.ad).cloned().unwrap();
        assert_eq!(position.discuss, None);
        assert_eq!(position.discuss_time, None);
    }

    #[test]
    fn blocking_position_needs_discuss_text() {
        let mut f = Fixture::new();
        let err = f.submit(PositionName::Discuss, Some("   "), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn unchanged_submission_is_a_no_op() {
        let mut f = Fixture::new();
        f.submit(PositionName::Yes, None, Some("Nice work")).unwrap();
        assert!(f.submit(PositionName::Yes, None, Some("Nice work ")).unwrap().is_none());
    }

    #[test]
    fn comment_only_update_keeps_position() {
        let mut f = Fixture::new();
        f.submit(PositionName::NoObj, None, None).unwrap();
        let event = f
            .submit(PositionName::NoObj, None, Some("One nit"))
            .unwrap()
            .unwrap();
        assert_eq!(event.desc, "[Ballot comment]\nOne nit");
        let position = f.ballot().position_of(&f.ad).cloned().unwrap();
        assert!(position.comment_time.is_some());
    }

    #[test]
    fn disallowed_position_is_rejected() {
        let mut f = Fixture::new();
        let err = f.submit(PositionName::Block, Some("no"), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn closed_ballot_rejects_positions() {
        let mut f = Fixture::new();
        let close = crate::domain::ballot::close_ballot(
            &f.log,
            &f.doc,
            f.ad,
            BallotType::DraftApprove,
        )
        .unwrap();
        f.log.record(close.into_event(DocEventId::from_raw(2)));
        let err = f.submit(PositionName::Yes, None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BallotClosed);
    }
}
