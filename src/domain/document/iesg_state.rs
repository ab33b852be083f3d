//! IESG processing states for drafts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Where a draft stands in IESG processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IesgState {
    /// I-D exists, not under IESG consideration.
    #[default]
    #[serde(rename = "idexists")]
    IdExists,
    #[serde(rename = "watching")]
    Watching,
    #[serde(rename = "pub-req")]
    PubReq,
    #[serde(rename = "ad-eval")]
    AdEval,
    #[serde(rename = "review-e")]
    ReviewE,
    #[serde(rename = "lc-req")]
    LcReq,
    #[serde(rename = "lc")]
    Lc,
    #[serde(rename = "writeupw")]
    WriteupW,
    #[serde(rename = "goaheadw")]
    GoAheadW,
    #[serde(rename = "iesg-eva")]
    IesgEva,
    #[serde(rename = "defer")]
    Defer,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "ann")]
    Ann,
    #[serde(rename = "rfcqueue")]
    RfcQueue,
    #[serde(rename = "pub")]
    Pub,
    #[serde(rename = "dead")]
    Dead,
}

impl IesgState {
    pub const ALL: [IesgState; 16] = [
        IesgState::IdExists,
        IesgState::Watching,
        IesgState::PubReq,
        IesgState::AdEval,
        IesgState::ReviewE,
        IesgState::LcReq,
        IesgState::Lc,
        IesgState::WriteupW,
        IesgState::GoAheadW,
        IesgState::IesgEva,
        IesgState::Defer,
        IesgState::Approved,
        IesgState::Ann,
        IesgState::RfcQueue,
        IesgState::Pub,
        IesgState::Dead,
    ];

    /// Machine name used in URLs and storage.
    pub fn slug(&self) -> &'static str {
        match self {
            IesgState::IdExists => "idexists",
            IesgState::Watching => "watching",
            IesgState::PubReq => "pub-req",
            IesgState::AdEval => "ad-eval",
            IesgState::ReviewE => "review-e",
            IesgState::LcReq => "lc-req",
            IesgState::Lc => "lc",
            IesgState::WriteupW => "writeupw",
            IesgState::GoAheadW => "goaheadw",
            IesgState::IesgEva => "iesg-eva",
            IesgState::Defer => "defer",
            IesgState::Approved => "approved",
            IesgState::Ann => "ann",
            IesgState::RfcQueue => "rfcqueue",
            IesgState::Pub => "pub",
            IesgState::Dead => "dead",
        }
    }

    /// Looks a state up by its slug.
    pub fn from_slug(slug: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.slug() == slug)
            .ok_or_else(|| {
                ValidationError::invalid_format("state", format!("unknown IESG state '{}'", slug))
            })
    }

    /// True while the IESG ballot is being evaluated.
    pub fn is_under_evaluation(&self) -> bool {
        matches!(self, IesgState::IesgEva | IesgState::Defer)
    }
}

impl StateMachine for IesgState {
    fn valid_transitions(&self) -> Vec<Self> {
        use IesgState::*;
        let mut next = match self {
            IdExists => vec![PubReq, Watching],
            Watching => vec![PubReq, AdEval, IdExists],
            PubReq => vec![AdEval, Watching],
            AdEval => vec![Watching, LcReq, ReviewE, IesgEva],
            ReviewE => vec![AdEval],
            LcReq => vec![Lc],
            Lc => vec![WriteupW, GoAheadW],
            WriteupW => vec![GoAheadW],
            GoAheadW => vec![IesgEva],
            IesgEva => vec![Defer, Approved, AdEval],
            Defer => vec![IesgEva],
            Approved => vec![Ann],
            Ann => vec![RfcQueue],
            RfcQueue => vec![Pub],
            Pub => vec![],
            Dead => vec![AdEval],
        };
        if !matches!(self, Pub | Dead) {
            next.push(Dead);
        }
        next
    }
}

impl fmt::Display for IesgState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IesgState::IdExists => "I-D Exists",
            IesgState::Watching => "AD is watching",
            IesgState::PubReq => "Publication Requested",
            IesgState::AdEval => "AD Evaluation",
            IesgState::ReviewE => "Expert Review",
            IesgState::LcReq => "Last Call Requested",
            IesgState::Lc => "In Last Call",
            IesgState::WriteupW => "Waiting for Writeup",
            IesgState::GoAheadW => "Waiting for AD Go-Ahead",
            IesgState::IesgEva => "IESG Evaluation",
            IesgState::Defer => "IESG Evaluation - Defer",
            IesgState::Approved => "Approved-announcement to be sent",
            IesgState::Ann => "Approved-announcement sent",
            IesgState::RfcQueue => "RFC Ed Queue",
            IesgState::Pub => "RFC Published",
            IesgState::Dead => "Dead",
        };
        write!(f, "{}", s)
    }
}
