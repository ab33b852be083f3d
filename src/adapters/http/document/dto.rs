//! HTTP DTOs for document endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::document::{
    ChangeDraftStateResult, RegisterDraftResult, SubmitDraftRevisionResult,
};
use crate::domain::doc_event::DocEvent;
use crate::domain::document::{Document, IesgState, Revision, StdLevel, Stream};
use crate::domain::foundation::{DocName, GroupAcronym, PersonId};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDraftRequest {
    pub name: DocName,
    pub title: String,
    #[serde(default)]
    pub group: Option<GroupAcronym>,
    #[serde(default)]
    pub stream: Stream,
    #[serde(default)]
    pub intended_std_level: Option<StdLevel>,
    #[serde(default)]
    pub ad: Option<PersonId>,
    #[serde(default)]
    pub notify: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRevisionRequest {
    pub rev: Revision,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeDraftStateRequest {
    pub state: IesgState,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub comment: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A document after a command, with the events the command appended.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentChangeResponse {
    pub document: Document,
    pub events: Vec<DocEvent>,
}

impl From<RegisterDraftResult> for DocumentChangeResponse {
    fn from(result: RegisterDraftResult) -> Self {
        Self {
            document: result.document,
            events: vec![result.event],
        }
    }
}

impl From<SubmitDraftRevisionResult> for DocumentChangeResponse {
    fn from(result: SubmitDraftRevisionResult) -> Self {
        Self {
            document: result.document,
            events: vec![result.event],
        }
    }
}

impl From<ChangeDraftStateResult> for DocumentChangeResponse {
    fn from(result: ChangeDraftStateResult) -> Self {
        Self {
            document: result.document,
            events: result.events,
        }
    }
}
