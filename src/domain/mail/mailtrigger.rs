//! Mail triggers: which recipient rules apply to each notification.

use std::fmt;

use super::Recipient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailTrigger {
    DocStateEdited,
    CharterStateChanged,
    CharterInternalReview,
    CharterExternalReview,
    CharterExternalReviewNewWork,
    CharterAbandoned,
    BallotIssued,
    BallotSaved,
    BallotApprovedCharter,
}

impl MailTrigger {
    pub fn slug(&self) -> &'static str {
        match self {
            MailTrigger::DocStateEdited => "doc_state_edited",
            MailTrigger::CharterStateChanged => "charter_state_changed",
            MailTrigger::CharterInternalReview => "charter_internal_review",
            MailTrigger::CharterExternalReview => "charter_external_review",
            MailTrigger::CharterExternalReviewNewWork => "charter_external_review_new_work",
            MailTrigger::CharterAbandoned => "charter_abandoned",
            MailTrigger::BallotIssued => "ballot_issued",
            MailTrigger::BallotSaved => "ballot_saved",
            MailTrigger::BallotApprovedCharter => "ballot_approved_charter",
        }
    }

    pub fn to(&self) -> &'static [Recipient] {
        use Recipient::*;
        match self {
            MailTrigger::DocStateEdited => &[DocNotify, DocAd, DocGroupChairs],
            MailTrigger::CharterStateChanged => {
                &[IesgSecretary, DocNotify, GroupChairs, GroupResponsibleDirectors]
            }
            MailTrigger::CharterInternalReview => &[Iesg, Iab],
            MailTrigger::CharterExternalReview => &[IetfAnnounce],
            MailTrigger::CharterExternalReviewNewWork => &[NewWork],
            MailTrigger::CharterAbandoned => &[DocNotify, GroupChairs, GroupResponsibleDirectors],
            MailTrigger::BallotIssued => &[BallotVotingBody],
            MailTrigger::BallotSaved => &[BallotVotingBody],
            MailTrigger::BallotApprovedCharter => &[IetfAnnounce],
        }
    }

    pub fn cc(&self) -> &'static [Recipient] {
        use Recipient::*;
        match self {
            MailTrigger::DocStateEdited => &[],
            MailTrigger::CharterStateChanged => &[],
            MailTrigger::CharterInternalReview => &[GroupChairs, GroupResponsibleDirectors],
            MailTrigger::CharterExternalReview => &[GroupMailList],
            MailTrigger::CharterExternalReviewNewWork => &[],
            MailTrigger::CharterAbandoned => &[IesgSecretary],
            MailTrigger::BallotIssued => &[],
            MailTrigger::BallotSaved => &[DocNotify, DocGroupChairs, DocAd],
            MailTrigger::BallotApprovedCharter => {
                &[GroupMailList, GroupChairs, GroupResponsibleDirectors]
            }
        }
    }
}

impl fmt::Display for MailTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}
