//! PostgreSQL person directory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, PersonId};
use crate::domain::person::Person;
use crate::ports::PersonDirectory;

use super::codec::{column, db_err};

#[derive(Clone)]
pub struct PostgresPersonDirectory {
    pool: PgPool,
}

impl PostgresPersonDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonDirectory for PostgresPersonDirectory {
    async fn find(&self, id: &PersonId) -> Result<Option<Person>, DomainError> {
        let row = sqlx::query("SELECT name, email FROM persons WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("fetch person"))?;

        match row {
            Some(row) => Ok(Some(Person {
                id: *id,
                name: column(&row, "name")?,
                email: column(&row, "email")?,
            })),
            None => Ok(None),
        }
    }

    async fn save(&self, person: &Person) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO persons (id, name, email) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email
            "#,
        )
        .bind(person.id.as_uuid())
        .bind(&person.name)
        .bind(&person.email)
        .execute(&self.pool)
        .await
        .map_err(db_err("save person"))?;

        Ok(())
    }
}
