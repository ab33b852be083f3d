//! HTTP DTOs for ballot endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::ballot::{EditPositionResult, IssueBallotResult};
use crate::domain::ballot::{Ballot, BallotType, PositionName};
use crate::domain::doc_event::DocEvent;
use crate::domain::foundation::{DocEventId, PersonId};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct IssueBallotRequest {
    pub ballot_type: BallotType,
    #[serde(default)]
    pub auto_yes: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseBallotRequest {
    pub ballot_type: BallotType,
}

/// A position on a ballot. The balloter defaults to the acting person.
#[derive(Debug, Clone, Deserialize)]
pub struct EditPositionRequest {
    #[serde(default)]
    pub ballot_id: Option<DocEventId>,
    #[serde(default)]
    pub balloter: Option<PersonId>,
    pub position: PositionName,
    #[serde(default)]
    pub discuss: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendPositionEmailRequest {
    #[serde(default)]
    pub ballot_id: Option<DocEventId>,
    #[serde(default)]
    pub balloter: Option<PersonId>,
    #[serde(default)]
    pub extra_cc: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BallotSummaryParams {
    #[serde(default)]
    pub ballot_id: Option<DocEventId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct BallotResponse {
    pub ballot: Ballot,
    pub events: Vec<DocEvent>,
}

impl From<IssueBallotResult> for BallotResponse {
    fn from(result: IssueBallotResult) -> Self {
        Self {
            ballot: result.ballot,
            events: result.events,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionResponse {
    pub ballot: Ballot,
    /// Whether the submission changed the recorded position.
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<DocEvent>,
}

impl From<EditPositionResult> for PositionResponse {
    fn from(result: EditPositionResult) -> Self {
        Self {
            ballot: result.ballot,
            changed: result.event.is_some(),
            event: result.event,
        }
    }
}
