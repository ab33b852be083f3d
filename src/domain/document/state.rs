//! Document state, tagged by the state machine it belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CharterState, IesgState};

/// Current state of a document.
///
/// Drafts are tracked through IESG processing, charters through the
/// chartering process; the variant records which machine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state_type", content = "state", rename_all = "kebab-case")]
pub enum DocState {
    DraftIesg(IesgState),
    Charter(CharterState),
}

impl DocState {
    /// Name of the state machine, e.g. `draft-iesg`.
    pub fn state_type(&self) -> &'static str {
        match self {
            DocState::DraftIesg(_) => "draft-iesg",
            DocState::Charter(_) => "charter",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            DocState::DraftIesg(state) => state.slug(),
            DocState::Charter(state) => state.slug(),
        }
    }

    pub fn as_iesg(&self) -> Option<IesgState> {
        match self {
            DocState::DraftIesg(state) => Some(*state),
            DocState::Charter(_) => None,
        }
    }

    pub fn as_charter(&self) -> Option<CharterState> {
        match self {
            DocState::Charter(state) => Some(*state),
            DocState::DraftIesg(_) => None,
        }
    }
}

impl fmt::Display for DocState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocState::DraftIesg(state) => write!(f, "{}", state),
            DocState::Charter(state) => write!(f, "{}", state),
        }
    }
}
