//! Ballot types and the bodies that vote on them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::document::{DocType, Stream};
use crate::domain::foundation::ValidationError;

use super::PositionName;

/// The body whose members hold positions on a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotingBody {
    Iesg,
    Irsg,
    Rsab,
}

impl VotingBody {
    /// Acronym of the group whose roles make up the body.
    pub fn acronym(&self) -> &'static str {
        match self {
            VotingBody::Iesg => "iesg",
            VotingBody::Irsg => "irsg",
            VotingBody::Rsab => "rsab",
        }
    }
}

impl fmt::Display for VotingBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VotingBody::Iesg => "IESG",
            VotingBody::Irsg => "IRSG",
            VotingBody::Rsab => "RSAB",
        };
        write!(f, "{}", s)
    }
}

/// Kind of ballot, scoped by document type.
///
/// Charter and draft ballots share the `approve` slug; the variant keeps
/// them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallotType {
    #[serde(rename = "r-extrev")]
    CharterExternalReview,
    #[serde(rename = "r-wo-ext")]
    CharterWithoutExternalReview,
    #[serde(rename = "charter-approve")]
    CharterApprove,
    #[serde(rename = "approve")]
    DraftApprove,
    #[serde(rename = "irsg-approve")]
    IrsgApprove,
    #[serde(rename = "rsab-approve")]
    RsabApprove,
}

impl BallotType {
    pub const ALL: [BallotType; 6] = [
        BallotType::CharterExternalReview,
        BallotType::CharterWithoutExternalReview,
        BallotType::CharterApprove,
        BallotType::DraftApprove,
        BallotType::IrsgApprove,
        BallotType::RsabApprove,
    ];

    /// Slug within the document type.
    pub fn slug(&self) -> &'static str {
        match self {
            BallotType::CharterExternalReview => "r-extrev",
            BallotType::CharterWithoutExternalReview => "r-wo-ext",
            BallotType::CharterApprove | BallotType::DraftApprove => "approve",
            BallotType::IrsgApprove => "irsg-approve",
            BallotType::RsabApprove => "rsab-approve",
        }
    }

    /// Resolves a slug for a document type.
    pub fn from_slug(doc_type: DocType, slug: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.doc_type() == doc_type && t.slug() == slug)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "ballot_type",
                    format!("no '{}' ballot for a {}", slug, doc_type.slug()),
                )
            })
    }

    pub fn doc_type(&self) -> DocType {
        match self {
            BallotType::CharterExternalReview
            | BallotType::CharterWithoutExternalReview
            | BallotType::CharterApprove => DocType::Charter,
            BallotType::DraftApprove | BallotType::IrsgApprove | BallotType::RsabApprove => {
                DocType::Draft
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BallotType::CharterExternalReview => "Ready for external review",
            BallotType::CharterWithoutExternalReview => "Ready w/o external review",
            BallotType::CharterApprove | BallotType::DraftApprove => "Approve",
            BallotType::IrsgApprove => "IRSG Approve",
            BallotType::RsabApprove => "RSAB Approve",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            BallotType::CharterExternalReview => "Is this charter ready for external review?",
            BallotType::CharterWithoutExternalReview => {
                "Is this charter ready for external review? Is this charter ready for approval without external review?"
            }
            BallotType::CharterApprove => "Do we approve of this charter?",
            BallotType::DraftApprove => "Is this draft ready for publication?",
            BallotType::IrsgApprove => "Is this draft ready for publication in the IRTF stream?",
            BallotType::RsabApprove => {
                "Is this draft ready for publication in the Editorial stream?"
            }
        }
    }

    pub fn voting_body(&self) -> VotingBody {
        match self {
            BallotType::IrsgApprove => VotingBody::Irsg,
            BallotType::RsabApprove => VotingBody::Rsab,
            _ => VotingBody::Iesg,
        }
    }

    /// Positions a balloter may take, in display order.
    pub fn positions(&self) -> &'static [PositionName] {
        use PositionName::*;
        match self {
            BallotType::CharterExternalReview
            | BallotType::CharterWithoutExternalReview
            | BallotType::CharterApprove => &[Yes, NoObj, Block, Abstain, NoRecord],
            BallotType::DraftApprove => &[Yes, NoObj, Discuss, Abstain, Recuse, NoRecord],
            BallotType::IrsgApprove => &[Yes, MoreTime, NotReady, Recuse, NoRecord],
            BallotType::RsabApprove => &[Yes, Concern, Recuse, NoRecord],
        }
    }

    pub fn allows(&self, pos: PositionName) -> bool {
        self.positions().contains(&pos)
    }

    /// The approval ballot for drafts in a stream, if that stream has one.
    pub fn draft_approval_for(stream: Stream) -> Option<Self> {
        match stream {
            Stream::Ietf => Some(BallotType::DraftApprove),
            Stream::Irtf => Some(BallotType::IrsgApprove),
            Stream::Editorial => Some(BallotType::RsabApprove),
            Stream::Iab | Stream::Ise => None,
        }
    }
}

impl fmt::Display for BallotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
