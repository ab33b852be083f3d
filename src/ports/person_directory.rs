//! Person directory port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::person::Person;

#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn find(&self, id: &PersonId) -> Result<Option<Person>, DomainError>;

    /// Insert or replace a person.
    async fn save(&self, person: &Person) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn PersonDirectory) {}
    }
}
