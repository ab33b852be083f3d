//! BallotSummaryHandler - every eligible balloter's position and whether the
//! ballot has enough support.

use std::sync::Arc;

use serde::Serialize;

use crate::application::support::{load_document, person_name, voting_body_members};
use crate::domain::ballot::{needed_positions, Ballot, BallotOutcome, PositionName};
use crate::domain::document::DocumentError;
use crate::domain::foundation::{DocEventId, DocName, PersonId, Timestamp};
use crate::ports::{DocEventStore, DocumentRepository, GroupRepository, PersonDirectory};

#[derive(Debug, Clone)]
pub struct BallotSummaryQuery {
    pub name: DocName,
    /// Defaults to the active ballot, then to the most recent one.
    pub ballot_id: Option<DocEventId>,
}

/// One row of the summary. Balloters who have not voted show as No Record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalloterPosition {
    pub balloter: PersonId,
    pub name: String,
    pub pos: PositionName,
    pub discuss: Option<String>,
    pub comment: Option<String>,
    pub time: Option<Timestamp>,
    /// False for people who voted but have since left the voting body.
    pub eligible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BallotSummary {
    pub ballot: Ballot,
    pub question: &'static str,
    pub positions: Vec<BalloterPosition>,
    pub outcome: BallotOutcome,
}

pub struct BallotSummaryHandler {
    documents: Arc<dyn DocumentRepository>,
    events: Arc<dyn DocEventStore>,
    groups: Arc<dyn GroupRepository>,
    people: Arc<dyn PersonDirectory>,
}

impl BallotSummaryHandler {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        events: Arc<dyn DocEventStore>,
        groups: Arc<dyn GroupRepository>,
        people: Arc<dyn PersonDirectory>,
    ) -> Self {
        Self {
            documents,
            events,
            groups,
            people,
        }
    }

    pub async fn handle(&self, query: BallotSummaryQuery) -> Result<BallotSummary, DocumentError> {
        let document = load_document(self.documents.as_ref(), &query.name).await?;
        let log = self.events.log_for(document.name()).await?;
        let ballot = match query.ballot_id {
            Some(id) => log.ballot(id),
            None => log.active_ballot().or_else(|| log.ballots().pop()),
        }
        .ok_or_else(|| DocumentError::not_found(format!("No ballot on {}", document.name())))?;

        let ballot_type = ballot.ballot_type();
        let members = voting_body_members(self.groups.as_ref(), ballot_type.voting_body()).await?;

        let mut positions = Vec::with_capacity(members.len());
        for role in &members {
            let name = person_name(self.people.as_ref(), &role.person, &role.email).await?;
            let row = match ballot.position_of(&role.person) {
                Some(p) => BalloterPosition {
                    balloter: role.person,
                    name,
                    pos: p.pos,
                    discuss: p.discuss.clone(),
                    comment: p.comment.clone(),
                    time: Some(p.time),
                    eligible: true,
                },
                None => BalloterPosition {
                    balloter: role.person,
                    name,
                    pos: PositionName::NoRecord,
                    discuss: None,
                    comment: None,
                    time: None,
                    eligible: true,
                },
            };
            positions.push(row);
        }
        let eligible_positions: Vec<PositionName> = positions.iter().map(|p| p.pos).collect();

        for p in ballot.positions() {
            if members.iter().any(|m| m.person == p.balloter) {
                continue;
            }
            let name = person_name(self.people.as_ref(), &p.balloter, "(former balloter)").await?;
            positions.push(BalloterPosition {
                balloter: p.balloter,
                name,
                pos: p.pos,
                discuss: p.discuss.clone(),
                comment: p.comment.clone(),
                time: Some(p.time),
                eligible: false,
            });
        }

        let outcome = needed_positions(ballot_type, &document, &eligible_positions);
        Ok(BallotSummary {
            question: ballot_type.question(),
            ballot,
            positions,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::ballot::{
        EditPositionCommand, EditPositionHandler, IssueBallotCommand, IssueBallotHandler,
    };
    use crate::application::testing::TestWorld;
    use crate::domain::ballot::BallotType;
    use crate::domain::document::{Document, StdLevel, Stream};

    async fn ballot_with(
        world: &TestWorld,
        level: StdLevel,
        votes: &[(usize, PositionName)],
    ) -> Document {
        let doc = world.draft("draft-foo", Stream::Ietf, Some(level)).await;
        IssueBallotHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.people.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        )
        .handle(
            IssueBallotCommand {
                name: doc.name().clone(),
                ballot_type: BallotType::DraftApprove,
                auto_yes: false,
            },
            world.metadata(),
        )
        .await
        .unwrap();
        let edit = EditPositionHandler::new(
            world.documents.clone(),
            world.groups.clone(),
            world.people.clone(),
            world.recorder(),
            world.bus.clone(),
            world.locks.clone(),
        );
        for (ad, pos) in votes {
            edit.handle(
                EditPositionCommand {
                    name: doc.name().clone(),
                    ballot_id: None,
                    balloter: world.ads[*ad],
                    pos: *pos,
                    discuss: pos.is_blocking().then(|| "Please fix".to_string()),
                    comment: None,
                },
                world.metadata(),
            )
            .await
            .unwrap();
        }
        doc
    }

    fn handler(world: &TestWorld) -> BallotSummaryHandler {
        BallotSummaryHandler::new(
            world.documents.clone(),
            world.events.clone(),
            world.groups.clone(),
            world.people.clone(),
        )
    }

    #[tokio::test]
    async fn missing_balloters_show_as_no_record() {
        let world = TestWorld::new().await;
        let doc = ballot_with(&world, StdLevel::Inf, &[(0, PositionName::Yes)]).await;

        let summary = handler(&world)
            .handle(BallotSummaryQuery {
                name: doc.name().clone(),
                ballot_id: None,
            })
            .await
            .unwrap();

        assert_eq!(summary.positions.len(), 3);
        assert_eq!(summary.positions[0].name, "Area Director 0");
        assert_eq!(summary.positions[0].pos, PositionName::Yes);
        assert_eq!(summary.positions[1].pos, PositionName::NoRecord);
        assert_eq!(summary.question, "Is this draft ready for publication?");
        assert!(summary.outcome.passes);
    }

    #[tokio::test]
    async fn standards_track_needs_two_thirds() {
        let world = TestWorld::new().await;
        let doc = ballot_with(&world, StdLevel::Ps, &[(0, PositionName::Yes)]).await;

        let summary = handler(&world)
            .handle(BallotSummaryQuery {
                name: doc.name().clone(),
                ballot_id: None,
            })
            .await
            .unwrap();

        assert!(!summary.outcome.passes);
        assert_eq!(
            summary.outcome.text,
            "Needs one more YES or NO OBJECTION position to pass."
        );
    }

    #[tokio::test]
    async fn discuss_is_reported() {
        let world = TestWorld::new().await;
        let doc = ballot_with(
            &world,
            StdLevel::Ps,
            &[
                (0, PositionName::Yes),
                (1, PositionName::NoObj),
                (2, PositionName::Discuss),
            ],
        )
        .await;

        let summary = handler(&world)
            .handle(BallotSummaryQuery {
                name: doc.name().clone(),
                ballot_id: None,
            })
            .await
            .unwrap();

        assert!(!summary.outcome.passes);
        assert_eq!(
            summary.outcome.text,
            "Has a DISCUSS. Has enough positions to pass once DISCUSS positions are resolved."
        );
        assert_eq!(summary.positions[2].discuss.as_deref(), Some("Please fix"));
    }

    #[tokio::test]
    async fn no_ballot_is_not_found() {
        let world = TestWorld::new().await;
        let doc = world.draft("draft-foo", Stream::Ietf, None).await;
        let err = handler(&world)
            .handle(BallotSummaryQuery {
                name: doc.name().clone(),
                ballot_id: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }
}
