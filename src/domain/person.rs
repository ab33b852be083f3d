//! People known to the tracker.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PersonId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
}

impl Person {
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name", "Name cannot be empty"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation("email", "Not an e-mail address"));
        }
        Ok(Self { id, name, email })
    }

    /// `Name <address>`, for mail headers.
    pub fn formatted_email(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}
