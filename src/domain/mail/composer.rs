//! Builds the notification messages sent on document and charter changes.

use crate::domain::ballot::{BallotPosition, BallotType};
use crate::domain::charter::{is_recharter, EXTERNAL_REVIEW_DAYS};
use crate::domain::document::Document;
use crate::domain::foundation::Timestamp;
use crate::domain::group::{Group, GroupType};
use crate::domain::person::Person;

use super::{AddressList, OutgoingMessage, IESG};

const RULE: &str = "----------------------------------------------------------------------";

/// Sender addresses and links used in outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Sender of tracker notifications.
    pub from: String,
    /// Sender of IESG announcements.
    pub announce_from: String,
    /// Base URL of the tracker, without a trailing slash.
    pub base_url: String,
}

/// Composes messages from documents, groups and recipient lists.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    settings: MailSettings,
}

impl MessageComposer {
    pub fn new(settings: MailSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    fn doc_url(&self, doc: &Document) -> String {
        format!("{}/doc/{}/", self.settings.base_url.trim_end_matches('/'), doc.name())
    }

    fn message(&self, from: &str, addresses: AddressList, subject: String, body: String) -> OutgoingMessage {
        OutgoingMessage {
            from: from.to_string(),
            to: addresses.to,
            cc: addresses.cc,
            subject,
            body,
        }
    }

    /// Notice sent when a draft changes IESG state.
    pub fn doc_state_changed(&self, doc: &Document, desc: &str, addresses: AddressList) -> OutgoingMessage {
        let body = format!(
            "{}\n\nThe document can be found at\n{}\n",
            desc,
            self.doc_url(doc)
        );
        self.message(
            &self.settings.from,
            addresses,
            format!("ID Tracker State Update Notice: {}", doc.name_with_rev()),
            body,
        )
    }

    /// Notice sent to the secretariat and chairs when a charter changes state.
    pub fn charter_state_changed(
        &self,
        doc: &Document,
        group: &Group,
        desc: &str,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let body = format!(
            "{}\n\nThe charter of the {} {} ({}) can be found at\n{}\n",
            desc,
            group.name(),
            group_kind(group),
            group.acronym(),
            self.doc_url(doc)
        );
        self.message(
            &self.settings.from,
            addresses,
            format!("Charter state changed for {} ({})", group.name(), group.acronym()),
            body,
        )
    }

    /// Request for internal IESG/IAB review of a charter.
    pub fn charter_internal_review(
        &self,
        doc: &Document,
        group: &Group,
        text: Option<&str>,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let subject = format!(
            "Internal {} Review: {}",
            group.group_type().label(),
            review_title(doc, group)
        );
        let body = format!(
            "A {} charter for the {} ({}) {} is ready for internal review by the IESG and IAB.\n\n\
             The charter can be found at\n{}\n\n{}",
            new_or_modified(doc),
            group.name(),
            group.acronym(),
            group_kind(group),
            self.doc_url(doc),
            charter_text_section(text)
        );
        self.message(&self.settings.from, addresses, subject, body)
    }

    /// Community announcement of a charter entering external review.
    pub fn charter_external_review(
        &self,
        doc: &Document,
        group: &Group,
        text: Option<&str>,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let subject = format!(
            "{} Review: {}",
            group.group_type().label(),
            review_title(doc, group)
        );
        let deadline = Timestamp::now().plus_days(EXTERNAL_REVIEW_DAYS).date();
        let area = group
            .parent()
            .map(|p| format!(" in the {} area", p))
            .unwrap_or_default();
        let body = format!(
            "A {} charter has been submitted for the {} ({}) {}{}. The IESG has not \
             made any determination yet. The following draft charter was submitted, \
             and is provided for informational purposes only. Please send your \
             comments to the IESG mailing list ({}) by {}.\n\n{}",
            new_or_modified(doc),
            group.name(),
            group.acronym(),
            group_kind(group),
            area,
            IESG,
            deadline,
            charter_text_section(text)
        );
        self.message(&self.settings.announce_from, addresses, subject, body)
    }

    /// Heads-up to other standards bodies about new work.
    pub fn charter_new_work(
        &self,
        doc: &Document,
        group: &Group,
        text: Option<&str>,
        addresses: AddressList,
    ) -> OutgoingMessage {
        self.charter_external_review(doc, group, text, addresses)
    }

    /// Notice that a chartering effort was abandoned.
    pub fn charter_abandoned(
        &self,
        doc: &Document,
        group: &Group,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let body = format!(
            "The chartering effort for the {} ({}) {} has been abandoned.\n\n{}\n",
            group.name(),
            group.acronym(),
            group_kind(group),
            self.doc_url(doc)
        );
        self.message(
            &self.settings.from,
            addresses,
            format!(
                "{} chartering abandoned: {} ({})",
                group.group_type().label(),
                group.name(),
                group.acronym()
            ),
            body,
        )
    }

    /// Notice that a ballot has been issued.
    pub fn ballot_issued(
        &self,
        doc: &Document,
        ballot_type: BallotType,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let body = format!(
            "A new \"{}\" ballot has been issued for {} ({}).\n\n{}\n\n\
             Please record your position at\n{}ballot/\n",
            ballot_type.name(),
            doc.name_with_rev(),
            doc.title(),
            ballot_type.question(),
            self.doc_url(doc)
        );
        self.message(
            &self.settings.from,
            addresses,
            format!("Ballot issued: {}", doc.name()),
            body,
        )
    }

    /// A balloter's position, sent to the voting body.
    pub fn ballot_position(
        &self,
        doc: &Document,
        balloter: &Person,
        position: &BallotPosition,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let blocking_label = position.pos.name().to_uppercase();
        let extra = match (position.discuss.is_some(), position.comment.is_some()) {
            (true, true) => format!(": (with {} and COMMENT)", blocking_label),
            (true, false) => format!(": (with {})", blocking_label),
            (false, true) => ": (with COMMENT)".to_string(),
            (false, false) => String::new(),
        };
        let subject = format!(
            "{}'s {} on {}{}",
            balloter.name,
            position.pos.name(),
            doc.name_with_rev(),
            extra
        );

        let mut body = format!(
            "{} has entered the following ballot position for\n{}: {}\n\n\
             When responding, please keep the subject line intact and reply to all\n\
             email addresses included in the To and CC lines. (Feel free to cut this\n\
             introductory paragraph, however.)\n\n\
             The document, along with other ballot positions, can be found here:\n{}ballot/\n",
            balloter.name,
            doc.name_with_rev(),
            position.pos.name(),
            self.doc_url(doc)
        );
        if let Some(discuss) = &position.discuss {
            body.push_str(&format!("\n\n\n{}\n{}:\n{}\n\n{}\n", RULE, blocking_label, RULE, discuss));
        }
        if let Some(comment) = &position.comment {
            body.push_str(&format!("\n\n\n{}\nCOMMENT:\n{}\n\n{}\n", RULE, RULE, comment));
        }

        self.message(&balloter.formatted_email(), addresses, subject, body)
    }

    /// Announcement of an approved charter.
    pub fn charter_approved(
        &self,
        doc: &Document,
        group: &Group,
        text: Option<&str>,
        addresses: AddressList,
    ) -> OutgoingMessage {
        let action = if is_recharter(doc.rev()) {
            "Rechartered"
        } else {
            "Formed"
        };
        let subject = format!(
            "{} Action: {} {} ({})",
            group.group_type().label(),
            action,
            group.name(),
            group.acronym()
        );
        let body = format!(
            "The {} ({}) {} has been {}. For additional information, please contact \
             the chairs or the responsible directors.\n\n{}",
            group.name(),
            group.acronym(),
            group_kind(group),
            action.to_lowercase(),
            charter_text_section(text)
        );
        self.message(&self.settings.announce_from, addresses, subject, body)
    }
}

fn group_kind(group: &Group) -> &'static str {
    match group.group_type() {
        GroupType::Rg => "research group",
        _ => "working group",
    }
}

fn new_or_modified(doc: &Document) -> &'static str {
    if is_recharter(doc.rev()) {
        "modified"
    } else {
        "new"
    }
}

fn review_title(doc: &Document, group: &Group) -> String {
    let recharter = if is_recharter(doc.rev()) {
        "Recharter of "
    } else {
        ""
    };
    format!("{}{} ({})", recharter, group.name(), group.acronym())
}

fn charter_text_section(text: Option<&str>) -> String {
    match text {
        Some(text) => format!("Charter:\n\n{}\n", text.trim_end()),
        None => "The charter text is not available yet.\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ballot::PositionName;
    use crate::domain::document::{Revision, Stream};
    use crate::domain::foundation::{DocEventId, DocName, GroupAcronym, PersonId};
    use crate::domain::group::GroupState;

    fn composer() -> MessageComposer {
        MessageComposer::new(MailSettings {
            from: "IETF Secretariat <ietf-secretariat-reply@ietf.org>".to_string(),
            announce_from: "The IESG <iesg-secretary@ietf.org>".to_string(),
            base_url: "https://datatracker.example.org/".to_string(),
        })
    }

    fn group() -> Group {
        Group::new(
            GroupAcronym::new("foo").unwrap(),
            "Foo Protocol",
            GroupType::Wg,
            GroupState::Proposed,
        )
        .unwrap()
    }

    fn charter_at(rev: &str) -> Document {
        let mut doc = Document::new_charter(
            DocName::new("charter-ietf-foo").unwrap(),
            GroupAcronym::new("foo").unwrap(),
            "Foo Protocol".to_string(),
            Stream::Ietf,
        )
        .unwrap();
        let target = Revision::parse(rev).unwrap();
        while doc.rev() < target {
            let next = if doc.rev().next_approved().unwrap() <= target {
                doc.rev().next_approved().unwrap()
            } else {
                doc.rev().next_charter().unwrap()
            };
            doc.set_revision(next).unwrap();
        }
        doc
    }

    fn to(addresses: &[&str]) -> AddressList {
        AddressList {
            to: addresses.iter().map(|a| a.to_string()).collect(),
            cc: vec![],
        }
    }

    #[test]
    fn external_review_subject_marks_recharters() {
        let new = composer().charter_external_review(
            &charter_at("00-01"),
            &group(),
            Some("Foo does things."),
            to(&["ietf-announce@ietf.org"]),
        );
        assert_eq!(new.subject, "WG Review: Foo Protocol (foo)");
        assert_eq!(new.from, "The IESG <iesg-secretary@ietf.org>");
        assert!(new.body.contains("Foo does things."));

        let re = composer().charter_external_review(
            &charter_at("01-00"),
            &group(),
            None,
            to(&["ietf-announce@ietf.org"]),
        );
        assert_eq!(re.subject, "WG Review: Recharter of Foo Protocol (foo)");
    }

    #[test]
    fn internal_review_subject() {
        let msg = composer().charter_internal_review(&charter_at("00-00"), &group(), None, to(&["iesg@ietf.org"]));
        assert_eq!(msg.subject, "Internal WG Review: Foo Protocol (foo)");
    }

    #[test]
    fn approval_announces_formed_or_rechartered() {
        let formed = composer().charter_approved(&charter_at("01"), &group(), None, to(&["a@b"]));
        assert_eq!(formed.subject, "WG Action: Formed Foo Protocol (foo)");
        let re = composer().charter_approved(&charter_at("02"), &group(), None, to(&["a@b"]));
        assert_eq!(re.subject, "WG Action: Rechartered Foo Protocol (foo)");
    }

    #[test]
    fn state_notice_links_the_document() {
        let msg = composer().doc_state_changed(
            &charter_at("00-00"),
            "State changed to Draft Charter",
            to(&["a@b"]),
        );
        assert_eq!(msg.subject, "ID Tracker State Update Notice: charter-ietf-foo-00-00");
        assert!(msg
            .body
            .contains("https://datatracker.example.org/doc/charter-ietf-foo/"));
    }

    #[test]
    fn position_subject_lists_discuss_and_comment() {
        let doc = charter_at("00-02");
        let balloter = Person::new(PersonId::new(), "Alice Area", "alice@example.org").unwrap();
        let position = BallotPosition {
            balloter: balloter.id,
            pos: PositionName::Block,
            discuss: Some("Scope is too wide.".to_string()),
            discuss_time: Some(Timestamp::now()),
            comment: Some("Typo in para 2.".to_string()),
            comment_time: Some(Timestamp::now()),
            time: Timestamp::now(),
            event_id: DocEventId::from_raw(3),
        };
        let msg = composer().ballot_position(&doc, &balloter, &position, to(&["iesg@ietf.org"]));
        assert_eq!(
            msg.subject,
            "Alice Area's Block on charter-ietf-foo-00-02: (with BLOCK and COMMENT)"
        );
        assert_eq!(msg.from, "Alice Area <alice@example.org>");
        assert!(msg.body.contains("BLOCK:"));
        assert!(msg.body.contains("Typo in para 2."));
    }
}
