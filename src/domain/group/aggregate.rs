//! Group aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::document::Stream;
use crate::domain::foundation::{
    DocName, DomainError, ErrorCode, GroupAcronym, PersonId, Timestamp,
};

use super::{GroupState, GroupType, RoleName};

/// A person holding a role in a group, with the address used for that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: RoleName,
    pub person: PersonId,
    pub email: String,
}

impl Role {
    pub fn new(name: RoleName, person: PersonId, email: impl Into<String>) -> Self {
        Self {
            name,
            person,
            email: email.into(),
        }
    }
}

/// A working group, research group, area or other body.
///
/// # Invariants
///
/// - a group has at most one charter, and never changes it once set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    acronym: GroupAcronym,
    name: String,
    group_type: GroupType,
    state: GroupState,
    parent: Option<GroupAcronym>,
    roles: Vec<Role>,
    list_email: Option<String>,
    charter: Option<DocName>,
    updated_at: Timestamp,
}

impl Group {
    pub fn new(
        acronym: GroupAcronym,
        name: impl Into<String>,
        group_type: GroupType,
        state: GroupState,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name", "Group name cannot be empty"));
        }
        Ok(Self {
            acronym,
            name,
            group_type,
            state,
            parent: None,
            roles: Vec::new(),
            list_email: None,
            charter: None,
            updated_at: Timestamp::now(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        acronym: GroupAcronym,
        name: String,
        group_type: GroupType,
        state: GroupState,
        parent: Option<GroupAcronym>,
        roles: Vec<Role>,
        list_email: Option<String>,
        charter: Option<DocName>,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            acronym,
            name,
            group_type,
            state,
            parent,
            roles,
            list_email,
            charter,
            updated_at,
        }
    }

    pub fn with_parent(mut self, parent: GroupAcronym) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_list_email(mut self, list_email: impl Into<String>) -> Self {
        self.list_email = Some(list_email.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.add_role(role);
        self
    }

    pub fn acronym(&self) -> &GroupAcronym {
        &self.acronym
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group_type(&self) -> GroupType {
        self.group_type
    }

    pub fn state(&self) -> GroupState {
        self.state
    }

    pub fn parent(&self) -> Option<&GroupAcronym> {
        self.parent.as_ref()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn list_email(&self) -> Option<&str> {
        self.list_email.as_deref()
    }

    pub fn charter(&self) -> Option<&DocName> {
        self.charter.as_ref()
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Role holders of any of the given role names.
    pub fn role_holders<'a>(&'a self, names: &'a [RoleName]) -> impl Iterator<Item = &'a Role> {
        self.roles.iter().filter(move |r| names.contains(&r.name))
    }

    pub fn has_role(&self, person: &PersonId, names: &[RoleName]) -> bool {
        self.role_holders(names).any(|r| r.person == *person)
    }

    /// Adds a role, ignoring exact duplicates.
    pub fn add_role(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
            self.touch();
        }
    }

    /// Name the group's charter has or would have, `charter-<stream>-<acronym>`.
    pub fn charter_name(&self) -> Result<DocName, DomainError> {
        let prefix = match self.charter_stream() {
            Stream::Irtf => "irtf",
            _ => "ietf",
        };
        Ok(DocName::new(format!("charter-{}-{}", prefix, self.acronym))?)
    }

    pub fn charter_stream(&self) -> Stream {
        self.group_type.charter_stream()
    }

    /// Links the group to its charter.
    pub fn attach_charter(&mut self, charter: DocName) -> Result<(), DomainError> {
        match &self.charter {
            Some(existing) if *existing == charter => Ok(()),
            Some(existing) => Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("{} already has charter {}", self.acronym, existing),
            )),
            None => {
                self.charter = Some(charter);
                self.touch();
                Ok(())
            }
        }
    }

    /// Changes the group state. Returns the previous state if it changed.
    pub fn set_state(&mut self, state: GroupState) -> Option<GroupState> {
        if self.state == state {
            return None;
        }
        let previous = self.state;
        self.state = state;
        self.touch();
        Some(previous)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(group_type: GroupType) -> Group {
        Group::new(
            GroupAcronym::new("foo").unwrap(),
            "Foo Working Group",
            group_type,
            GroupState::Bof,
        )
        .unwrap()
    }

    #[test]
    fn charter_name_depends_on_group_type() {
        assert_eq!(group(GroupType::Wg).charter_name().unwrap().as_str(), "charter-ietf-foo");
        assert_eq!(group(GroupType::Rg).charter_name().unwrap().as_str(), "charter-irtf-foo");
    }

    #[test]
    fn a_group_keeps_its_first_charter() {
        let mut g = group(GroupType::Wg);
        let name = g.charter_name().unwrap();
        g.attach_charter(name.clone()).unwrap();
        g.attach_charter(name).unwrap();

        let err = g
            .attach_charter(DocName::new("charter-ietf-bar").unwrap())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }

    #[test]
    fn role_lookup() {
        let chair = PersonId::new();
        let g = group(GroupType::Wg)
            .with_role(Role::new(RoleName::Chair, chair, "chair@example.org"))
            .with_role(Role::new(RoleName::Chair, chair, "chair@example.org"));
        assert_eq!(g.roles().len(), 1);
        assert!(g.has_role(&chair, &[RoleName::Chair, RoleName::Secr]));
        assert!(!g.has_role(&chair, &[RoleName::Ad]));
    }

    #[test]
    fn set_state_reports_the_previous_state_only_on_change() {
        let mut g = group(GroupType::Wg);
        assert_eq!(g.set_state(GroupState::Proposed), Some(GroupState::Bof));
        assert_eq!(g.set_state(GroupState::Proposed), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Group::new(
            GroupAcronym::new("foo").unwrap(),
            " ",
            GroupType::Wg,
            GroupState::Bof,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
