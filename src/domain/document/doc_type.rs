//! Document classification enums: type, stream and intended status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of document tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Draft,
    Charter,
}

impl DocType {
    pub fn slug(&self) -> &'static str {
        match self {
            DocType::Draft => "draft",
            DocType::Charter => "charter",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocType::Draft => "Draft",
            DocType::Charter => "Charter",
        };
        write!(f, "{}", s)
    }
}

/// Publication stream a draft belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Stream {
    #[default]
    Ietf,
    Irtf,
    Iab,
    Ise,
    Editorial,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stream::Ietf => "IETF",
            Stream::Irtf => "IRTF",
            Stream::Iab => "IAB",
            Stream::Ise => "ISE",
            Stream::Editorial => "Editorial",
        };
        write!(f, "{}", s)
    }
}

/// Intended publication status of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdLevel {
    Ps,
    Ds,
    Std,
    Bcp,
    Inf,
    Exp,
    Hist,
}

impl StdLevel {
    /// Standards-track and BCP documents need broad IESG support to pass.
    pub fn is_standards_track(&self) -> bool {
        matches!(
            self,
            StdLevel::Ps | StdLevel::Ds | StdLevel::Std | StdLevel::Bcp
        )
    }
}

impl fmt::Display for StdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StdLevel::Ps => "Proposed Standard",
            StdLevel::Ds => "Draft Standard",
            StdLevel::Std => "Internet Standard",
            StdLevel::Bcp => "Best Current Practice",
            StdLevel::Inf => "Informational",
            StdLevel::Exp => "Experimental",
            StdLevel::Hist => "Historic",
        };
        write!(f, "{}", s)
    }
}
