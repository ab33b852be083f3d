//! Ballot position names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A position a balloter can take on a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionName {
    Yes,
    NoObj,
    Discuss,
    Block,
    Abstain,
    Recuse,
    NoRecord,
    MoreTime,
    NotReady,
    Concern,
}

impl PositionName {
    pub const ALL: [PositionName; 10] = [
        PositionName::Yes,
        PositionName::NoObj,
        PositionName::Discuss,
        PositionName::Block,
        PositionName::Abstain,
        PositionName::Recuse,
        PositionName::NoRecord,
        PositionName::MoreTime,
        PositionName::NotReady,
        PositionName::Concern,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            PositionName::Yes => "yes",
            PositionName::NoObj => "noobj",
            PositionName::Discuss => "discuss",
            PositionName::Block => "block",
            PositionName::Abstain => "abstain",
            PositionName::Recuse => "recuse",
            PositionName::NoRecord => "norecord",
            PositionName::MoreTime => "moretime",
            PositionName::NotReady => "notready",
            PositionName::Concern => "concern",
        }
    }

    pub fn from_slug(slug: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|pos| pos.slug() == slug)
            .ok_or_else(|| {
                ValidationError::invalid_format("position", format!("unknown position '{}'", slug))
            })
    }

    /// Human name, e.g. "No Objection".
    pub fn name(&self) -> &'static str {
        match self {
            PositionName::Yes => "Yes",
            PositionName::NoObj => "No Objection",
            PositionName::Discuss => "Discuss",
            PositionName::Block => "Block",
            PositionName::Abstain => "Abstain",
            PositionName::Recuse => "Recuse",
            PositionName::NoRecord => "No Record",
            PositionName::MoreTime => "Need More Time",
            PositionName::NotReady => "Not Ready",
            PositionName::Concern => "Concern",
        }
    }

    /// Blocking positions stop a ballot from passing and carry discuss text.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            PositionName::Discuss | PositionName::Block | PositionName::NotReady | PositionName::Concern
        )
    }
}

impl fmt::Display for PositionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_positions() {
        let blocking: Vec<_> = PositionName::ALL
            .into_iter()
            .filter(PositionName::is_blocking)
            .collect();
        assert_eq!(
            blocking,
            vec![
                PositionName::Discuss,
                PositionName::Block,
                PositionName::NotReady,
                PositionName::Concern
            ]
        );
    }

    #[test]
    fn slugs_match_serde() {
        for pos in PositionName::ALL {
            assert_eq!(PositionName::from_slug(pos.slug()).unwrap(), pos);
            assert_eq!(serde_json::to_string(&pos).unwrap(), format!("\"{}\"", pos.slug()));
        }
    }

    #[test]
    fn display_uses_human_names() {
        assert_eq!(PositionName::NoObj.to_string(), "No Objection");
        assert_eq!(PositionName::MoreTime.to_string(), "Need More Time");
    }
}
