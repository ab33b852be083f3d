//! Revision numbering for drafts and charters.
//!
//! Drafts are numbered `00`, `01`, `02`, ... and every submission must carry
//! exactly the next number.
//!
//! Charters alternate between approved revisions (`NN`) and proposals built
//! on top of them (`NN-MM`). Starting a proposal from `01` yields `01-00`;
//! each new proposal text bumps the minor part; approval yields `02`.
//! A brand new charter begins at `00-00` and is approved as `01`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Highest value either revision component can take.
pub const MAX_REVISION_COMPONENT: u8 = 99;

/// A document revision, `NN` or `NN-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Revision {
    major: u8,
    minor: Option<u8>,
}

impl Revision {
    /// The first revision of a draft, `00`.
    pub fn initial_draft() -> Self {
        Self {
            major: 0,
            minor: None,
        }
    }

    /// The first revision of a new charter, `00-00`.
    pub fn initial_charter() -> Self {
        Self {
            major: 0,
            minor: Some(0),
        }
    }

    /// Builds a revision from its components.
    pub fn from_parts(major: u8, minor: Option<u8>) -> Result<Self, ValidationError> {
        check_component("rev", major)?;
        if let Some(minor) = minor {
            check_component("rev", minor)?;
        }
        Ok(Self { major, minor })
    }

    /// Parses `NN` or `NN-MM` (two digits each).
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let (major, minor) = match value.split_once('-') {
            Some((major, minor)) => (major, Some(minor)),
            None => (value, None),
        };
        let major = parse_component(major)?;
        let minor = minor.map(parse_component).transpose()?;
        Ok(Self { major, minor })
    }

    /// The approved part of the revision.
    pub fn major(&self) -> u8 {
        self.major
    }

    /// The proposal counter, if this is a proposal revision.
    pub fn minor(&self) -> Option<u8> {
        self.minor
    }

    /// True for `NN-MM` revisions.
    pub fn is_proposal(&self) -> bool {
        self.minor.is_some()
    }

    /// The next draft revision, `NN+1`.
    pub fn next_draft(&self) -> Result<Self, ValidationError> {
        if self.is_proposal() {
            return Err(ValidationError::invalid_format(
                "rev",
                format!("{} is not a draft revision", self),
            ));
        }
        Ok(Self {
            major: bump("rev", self.major)?,
            minor: None,
        })
    }

    /// The next charter proposal revision.
    ///
    /// `NN` becomes `NN-00`; `NN-MM` becomes `NN-(MM+1)`.
    pub fn next_charter(&self) -> Result<Self, ValidationError> {
        let minor = match self.minor {
            Some(minor) => bump("rev", minor)?,
            None => 0,
        };
        Ok(Self {
            major: self.major,
            minor: Some(minor),
        })
    }

    /// The approved revision this one is based on, `NN`.
    pub fn approved(&self) -> Self {
        Self {
            major: self.major,
            minor: None,
        }
    }

    /// The revision an approval of this one produces, `NN+1`.
    pub fn next_approved(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            major: bump("rev", self.major)?,
            minor: None,
        })
    }

    fn sort_key(&self) -> (u8, u16) {
        (
            self.major,
            self.minor.map(|minor| u16::from(minor) + 1).unwrap_or(0),
        )
    }
}

fn check_component(field: &str, value: u8) -> Result<(), ValidationError> {
    if value > MAX_REVISION_COMPONENT {
        return Err(ValidationError::out_of_range(
            field,
            0,
            i32::from(MAX_REVISION_COMPONENT),
            i32::from(value),
        ));
    }
    Ok(())
}

fn bump(field: &str, value: u8) -> Result<u8, ValidationError> {
    let next = value.saturating_add(1);
    check_component(field, next)?;
    Ok(next)
}

fn parse_component(part: &str) -> Result<u8, ValidationError> {
    if part.len() != 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "rev",
            format!("'{}' is not a two-digit revision number", part),
        ));
    }
    part.parse::<u8>()
        .map_err(|e| ValidationError::invalid_format("rev", e.to_string()))
}

impl PartialOrd for Revision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Revision {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{:02}-{:02}", self.major, minor),
            None => write!(f, "{:02}", self.major),
        }
    }
}

impl FromStr for Revision {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Revision {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Revision> for String {
    fn from(rev: Revision) -> Self {
        rev.to_string()
    }
}
