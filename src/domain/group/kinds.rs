//! Group classification: type, state and role names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::document::Stream;

/// Kind of group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Wg,
    Rg,
    Area,
    Ietf,
    Irtf,
    Program,
}

impl GroupType {
    /// Working and research groups operate under a charter.
    pub fn is_chartered(&self) -> bool {
        matches!(self, GroupType::Wg | GroupType::Rg)
    }

    /// Short label used in announcements, e.g. "WG".
    pub fn label(&self) -> &'static str {
        match self {
            GroupType::Wg => "WG",
            GroupType::Rg => "RG",
            GroupType::Area => "Area",
            GroupType::Ietf => "IETF",
            GroupType::Irtf => "IRTF",
            GroupType::Program => "Program",
        }
    }

    /// Stream charters of this group type belong to.
    pub fn charter_stream(&self) -> Stream {
        match self {
            GroupType::Rg | GroupType::Irtf => Stream::Irtf,
            _ => Stream::Ietf,
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Lifecycle state of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupState {
    Bof,
    Proposed,
    Active,
    Conclude,
    Replaced,
    Abandon,
    #[default]
    Unknown,
}

impl GroupState {
    pub fn slug(&self) -> &'static str {
        match self {
            GroupState::Bof => "bof",
            GroupState::Proposed => "proposed",
            GroupState::Active => "active",
            GroupState::Conclude => "conclude",
            GroupState::Replaced => "replaced",
            GroupState::Abandon => "abandon",
            GroupState::Unknown => "unknown",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        [
            GroupState::Bof,
            GroupState::Proposed,
            GroupState::Active,
            GroupState::Conclude,
            GroupState::Replaced,
            GroupState::Abandon,
            GroupState::Unknown,
        ]
        .into_iter()
        .find(|s| s.slug() == slug)
    }
}

impl fmt::Display for GroupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GroupState::Bof => "BOF",
            GroupState::Proposed => "Proposed",
            GroupState::Active => "Active",
            GroupState::Conclude => "Concluded",
            GroupState::Replaced => "Replaced",
            GroupState::Abandon => "Abandoned",
            GroupState::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Name of a role a person holds in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Chair,
    Ad,
    Secr,
    Delegate,
    Member,
}

impl RoleName {
    pub fn slug(&self) -> &'static str {
        match self {
            RoleName::Chair => "chair",
            RoleName::Ad => "ad",
            RoleName::Secr => "secr",
            RoleName::Delegate => "delegate",
            RoleName::Member => "member",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        [
            RoleName::Chair,
            RoleName::Ad,
            RoleName::Secr,
            RoleName::Delegate,
            RoleName::Member,
        ]
        .into_iter()
        .find(|r| r.slug() == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_working_and_research_groups_are_chartered() {
        assert!(GroupType::Wg.is_chartered());
        assert!(GroupType::Rg.is_chartered());
        assert!(!GroupType::Area.is_chartered());
        assert!(!GroupType::Program.is_chartered());
    }

    #[test]
    fn research_groups_charter_in_the_irtf_stream() {
        assert_eq!(GroupType::Rg.charter_stream(), Stream::Irtf);
        assert_eq!(GroupType::Wg.charter_stream(), Stream::Ietf);
    }

    #[test]
    fn slugs_round_trip() {
        assert_eq!(GroupState::from_slug("proposed"), Some(GroupState::Proposed));
        assert_eq!(GroupState::from_slug("nope"), None);
        assert_eq!(RoleName::from_slug("ad"), Some(RoleName::Ad));
        assert_eq!(serde_json::to_string(&GroupState::Abandon).unwrap(), "\"abandon\"");
    }
}
