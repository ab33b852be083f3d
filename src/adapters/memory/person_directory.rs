//! In-memory person directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::person::Person;
use crate::ports::PersonDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPersonDirectory {
    people: Arc<RwLock<HashMap<PersonId, Person>>>,
}

impl InMemoryPersonDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonDirectory for InMemoryPersonDirectory {
    async fn find(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        Ok(self.people.read().await.get(id).cloned())
    }

    async fn save(&self, person: &Person) -> Result<(), DomainError> {
        self.people.write().await.insert(person.id, person.clone());
        Ok(())
    }
}
