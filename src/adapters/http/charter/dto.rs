//! HTTP DTOs for chartering endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::charter::{
    ApproveCharterResult, ChangeCharterStateResult, StartCharteringResult,
    SubmitCharterTextResult,
};
use crate::domain::doc_event::DocEvent;
use crate::domain::document::{CharterState, Document};

#[derive(Debug, Clone, Deserialize)]
pub struct StartCharteringRequest {
    /// `infrev` or `intrev`.
    pub target: CharterState,
    #[serde(default)]
    pub without_external_review: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeCharterStateRequest {
    pub target: CharterState,
    #[serde(default)]
    pub without_external_review: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitCharterTextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MilestoneParams {
    #[serde(default)]
    pub include_deleted: bool,
}

/// The charter after a command, with the events the command appended.
#[derive(Debug, Clone, Serialize)]
pub struct CharterChangeResponse {
    pub document: Document,
    pub events: Vec<DocEvent>,
}

impl From<StartCharteringResult> for CharterChangeResponse {
    fn from(result: StartCharteringResult) -> Self {
        Self {
            document: result.document,
            events: result.events,
        }
    }
}

impl From<ChangeCharterStateResult> for CharterChangeResponse {
    fn from(result: ChangeCharterStateResult) -> Self {
        Self {
            document: result.document,
            events: result.events,
        }
    }
}

impl From<SubmitCharterTextResult> for CharterChangeResponse {
    fn from(result: SubmitCharterTextResult) -> Self {
        Self {
            document: result.document,
            events: vec![result.event],
        }
    }
}

impl From<ApproveCharterResult> for CharterChangeResponse {
    fn from(result: ApproveCharterResult) -> Self {
        Self {
            document: result.document,
            events: result.events,
        }
    }
}
