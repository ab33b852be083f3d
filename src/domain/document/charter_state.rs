//! Charter review states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Where a charter stands in the chartering process.
///
/// A charter moves from "not under review" through informal, internal and
/// external review to IESG review and approval. Rechartering restarts the
/// cycle from `Approved`. Abandoning a first chartering drops back to
/// `NotRev`; abandoning a recharter returns to `Approved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CharterState {
    #[default]
    NotRev,
    InfRev,
    IntRev,
    ExtRev,
    IesgRev,
    Approved,
}

impl CharterState {
    pub const ALL: [CharterState; 6] = [
        CharterState::NotRev,
        CharterState::InfRev,
        CharterState::IntRev,
        CharterState::ExtRev,
        CharterState::IesgRev,
        CharterState::Approved,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            CharterState::NotRev => "notrev",
            CharterState::InfRev => "infrev",
            CharterState::IntRev => "intrev",
            CharterState::ExtRev => "extrev",
            CharterState::IesgRev => "iesgrev",
            CharterState::Approved => "approved",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.slug() == slug)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "state",
                    format!("unknown charter state '{}'", slug),
                )
            })
    }

    /// True while a (re)chartering effort is in progress.
    pub fn is_under_review(&self) -> bool {
        matches!(
            self,
            CharterState::InfRev | CharterState::IntRev | CharterState::ExtRev | CharterState::IesgRev
        )
    }

    /// States from which a new chartering effort may start.
    pub fn can_start_chartering(&self) -> bool {
        matches!(self, CharterState::NotRev | CharterState::Approved)
    }
}

impl StateMachine for CharterState {
    fn valid_transitions(&self) -> Vec<Self> {
        use CharterState::*;
        match self {
            NotRev => vec![InfRev, IntRev],
            InfRev => vec![IntRev, NotRev],
            IntRev => vec![ExtRev, IesgRev, InfRev, NotRev],
            ExtRev => vec![IesgRev, NotRev],
            IesgRev => vec![Approved, ExtRev, NotRev],
            Approved => vec![InfRev, IntRev],
        }
    }
}

impl fmt::Display for CharterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CharterState::NotRev => "Not currently under review",
            CharterState::InfRev => "Draft Charter",
            CharterState::IntRev => "Start Chartering/Rechartering (Internal IESG/IAB Review)",
            CharterState::ExtRev => "External Review (Message to Community, Selected by Secretariat)",
            CharterState::IesgRev => "IESG Review (Charter for Approval, Selected by Secretariat)",
            CharterState::Approved => "Approved",
        };
        write!(f, "{}", s)
    }
}
