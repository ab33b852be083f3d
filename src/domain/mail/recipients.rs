//! Recipient rules and address-list gathering.

use std::collections::BTreeSet;

use crate::domain::ballot::{BallotType, VotingBody};
use crate::domain::document::{Document, Stream};
use crate::domain::group::{Group, RoleName};
use crate::domain::person::Person;

use super::MailTrigger;

pub const IESG: &str = "iesg@ietf.org";
pub const IESG_SECRETARY: &str = "iesg-secretary@ietf.org";
pub const IAB: &str = "iab@iab.org";
pub const IRSG: &str = "irsg@irtf.org";
pub const RSAB: &str = "rsab@rfc-editor.org";
pub const IETF_ANNOUNCE: &str = "ietf-announce@ietf.org";
pub const NEW_WORK: &str = "new-work@ietf.org";

/// A rule producing zero or more addresses from a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    DocNotify,
    DocAd,
    DocGroupChairs,
    GroupChairs,
    GroupResponsibleDirectors,
    GroupMailList,
    Iesg,
    IesgSecretary,
    Iab,
    Irsg,
    Rsab,
    IetfAnnounce,
    NewWork,
    BallotVotingBody,
}

/// What the recipient rules can look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipientContext<'a> {
    pub doc: Option<&'a Document>,
    pub doc_ad: Option<&'a Person>,
    pub group: Option<&'a Group>,
    pub ballot_type: Option<BallotType>,
}

/// Resolved `to` and `cc` lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    pub to: Vec<String>,
    pub cc: Vec<String>,
}

impl AddressList {
    pub fn is_empty(&self) -> bool {
        self.to.is_empty()
    }

    /// Adds extra cc addresses, keeping the lists disjoint.
    pub fn with_extra_cc(mut self, extra: &[String]) -> Self {
        let mut cc: BTreeSet<String> = self.cc.into_iter().collect();
        cc.extend(extra.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()));
        self.cc = cc.into_iter().filter(|a| !self.to.contains(a)).collect();
        self
    }
}

fn chairs_alias(group: &Group) -> String {
    let domain = match group.charter_stream() {
        Stream::Irtf => "irtf.org",
        _ => "ietf.org",
    };
    format!("{}-chairs@{}", group.acronym(), domain)
}

impl Recipient {
    pub fn addresses(&self, ctx: &RecipientContext<'_>) -> Vec<String> {
        match self {
            Recipient::DocNotify => ctx.doc.map(|d| d.notify().to_vec()).unwrap_or_default(),
            Recipient::DocAd => ctx.doc_ad.map(|p| vec![p.email.clone()]).unwrap_or_default(),
            Recipient::DocGroupChairs => match (ctx.doc, ctx.group) {
                (Some(doc), Some(group)) if doc.group() == Some(group.acronym()) => {
                    vec![chairs_alias(group)]
                }
                _ => Vec::new(),
            },
            Recipient::GroupChairs => ctx.group.map(|g| vec![chairs_alias(g)]).unwrap_or_default(),
            Recipient::GroupResponsibleDirectors => match ctx.group {
                Some(group) => {
                    let ads: Vec<String> = group
                        .role_holders(&[RoleName::Ad])
                        .map(|r| r.email.clone())
                        .collect();
                    if !ads.is_empty() {
                        ads
                    } else if group.charter_stream() == Stream::Irtf {
                        vec!["irtf-chair@irtf.org".to_string()]
                    } else if let Some(parent) = group.parent() {
                        vec![format!("{}-ads@ietf.org", parent)]
                    } else {
                        Vec::new()
                    }
                }
                None => Vec::new(),
            },
            Recipient::GroupMailList => ctx
                .group
                .and_then(|g| g.list_email())
                .map(|l| vec![l.to_string()])
                .unwrap_or_default(),
            Recipient::Iesg => vec![IESG.to_string()],
            Recipient::IesgSecretary => vec![IESG_SECRETARY.to_string()],
            Recipient::Iab => vec![IAB.to_string()],
            Recipient::Irsg => vec![IRSG.to_string()],
            Recipient::Rsab => vec![RSAB.to_string()],
            Recipient::IetfAnnounce => vec![IETF_ANNOUNCE.to_string()],
            Recipient::NewWork => vec![NEW_WORK.to_string()],
            Recipient::BallotVotingBody => {
                let body = ctx
                    .ballot_type
                    .map(|t| t.voting_body())
                    .unwrap_or(VotingBody::Iesg);
                let address = match body {
                    VotingBody::Iesg => IESG,
                    VotingBody::Irsg => IRSG,
                    VotingBody::Rsab => RSAB,
                };
                vec![address.to_string()]
            }
        }
    }
}

fn resolve(rules: &[Recipient], ctx: &RecipientContext<'_>) -> BTreeSet<String> {
    rules
        .iter()
        .flat_map(|r| r.addresses(ctx))
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}

/// Resolves a trigger's rules into sorted, de-duplicated lists.
///
/// Addresses present in `to` are dropped from `cc`.
pub fn gather_address_lists(trigger: MailTrigger, ctx: &RecipientContext<'_>) -> AddressList {
    let to = resolve(trigger.to(), ctx);
    let cc = resolve(trigger.cc(), ctx);
    AddressList {
        cc: cc.difference(&to).cloned().collect(),
        to: to.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::NewDraft;
    use crate::domain::foundation::{DocName, GroupAcronym, PersonId};
    use crate::domain::group::{GroupState, GroupType, Role};

    fn group() -> Group {
        Group::new(
            GroupAcronym::new("foo").unwrap(),
            "Foo",
            GroupType::Wg,
            GroupState::Active,
        )
        .unwrap()
        .with_parent(GroupAcronym::new("art").unwrap())
        .with_list_email("foo@ietf.org")
    }

    fn draft() -> Document {
        Document::new_draft(NewDraft {
            name: DocName::new("draft-ietf-foo-bar").unwrap(),
            title: "Foo".to_string(),
            group: Some(GroupAcronym::new("foo").unwrap()),
            stream: Stream::Ietf,
            intended_std_level: None,
            ad: None,
            notify: vec!["foo-chairs@ietf.org".to_string(), "author@example.org".to_string()],
        })
        .unwrap()
    }

    #[test]
    fn doc_state_edit_goes_to_notify_ad_and_chairs_without_duplicates() {
        let doc = draft();
        let group = group();
        let ad = Person::new(PersonId::new(), "Alice Area", "alice@example.org").unwrap();
        let ctx = RecipientContext {
            doc: Some(&doc),
            doc_ad: Some(&ad),
            group: Some(&group),
            ballot_type: None,
        };
        let lists = gather_address_lists(MailTrigger::DocStateEdited, &ctx);
        assert_eq!(
            lists.to,
            vec![
                "alice@example.org".to_string(),
                "author@example.org".to_string(),
                "foo-chairs@ietf.org".to_string(),
            ]
        );
        assert!(lists.cc.is_empty());
    }

    #[test]
    fn responsible_directors_fall_back_to_area_alias() {
        let g = group();
        let ctx = RecipientContext {
            group: Some(&g),
            ..Default::default()
        };
        assert_eq!(
            Recipient::GroupResponsibleDirectors.addresses(&ctx),
            vec!["art-ads@ietf.org".to_string()]
        );

        let g = group().with_role(Role::new(RoleName::Ad, PersonId::new(), "ad@example.org"));
        let ctx = RecipientContext {
            group: Some(&g),
            ..Default::default()
        };
        assert_eq!(
            Recipient::GroupResponsibleDirectors.addresses(&ctx),
            vec!["ad@example.org".to_string()]
        );
    }

    #[test]
    fn cc_excludes_addresses_already_in_to() {
        let g = group();
        let ctx = RecipientContext {
            group: Some(&g),
            ..Default::default()
        };
        let lists = gather_address_lists(MailTrigger::CharterInternalReview, &ctx);
        assert_eq!(lists.to, vec![IAB.to_string(), IESG.to_string()]);
        assert_eq!(
            lists.cc,
            vec!["art-ads@ietf.org".to_string(), "foo-chairs@ietf.org".to_string()]
        );

        let lists = lists.with_extra_cc(&[IESG.to_string(), "extra@example.org".to_string()]);
        assert!(lists.cc.contains(&"extra@example.org".to_string()));
        assert!(!lists.cc.contains(&IESG.to_string()));
    }

    #[test]
    fn voting_body_follows_ballot_type() {
        let ctx = RecipientContext {
            ballot_type: Some(BallotType::IrsgApprove),
            ..Default::default()
        };
        assert_eq!(Recipient::BallotVotingBody.addresses(&ctx), vec![IRSG.to_string()]);
        let ctx = RecipientContext::default();
        assert_eq!(Recipient::BallotVotingBody.addresses(&ctx), vec![IESG.to_string()]);
    }
}
