//! PostgreSQL implementation of DocumentRepository.
//!
//! Each update first copies the stored row into `document_history` as a
//! JSON snapshot, inside the same transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::document::{CharterState, DocHistory, DocState, Document, IesgState, Revision};
use crate::domain::foundation::{
    DocName, DomainError, ErrorCode, GroupAcronym, PersonId, Timestamp,
};
use crate::ports::DocumentRepository;

use super::codec::{column, db_err, enum_from_str, enum_to_str, from_json, stored, to_json};

const SELECT_DOCUMENT: &str = r#"
    SELECT name, doc_type, title, rev, state_type, state, group_acronym, stream,
           ad, notify, intended_std_level, created_at, updated_at
    FROM documents
"#;

#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, doc: &Document) -> Result<(), DomainError> {
        if self.exists(doc.name()).await? {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Document already exists: {}", doc.name()),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO documents (
                name, doc_type, title, rev, state_type, state, group_acronym, stream,
                ad, notify, intended_std_level, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(doc.name().as_str())
        .bind(doc.doc_type().slug())
        .bind(doc.title())
        .bind(doc.rev().to_string())
        .bind(doc.state().state_type())
        .bind(doc.state().slug())
        .bind(doc.group().map(|g| g.as_str().to_string()))
        .bind(enum_to_str(&doc.stream())?)
        .bind(doc.ad().map(|id| *id.as_uuid()))
        .bind(doc.notify().to_vec())
        .bind(doc.intended_std_level().map(|l| enum_to_str(&l)).transpose()?)
        .bind(doc.created_at().as_datetime())
        .bind(doc.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_err("insert document"))?;

        Ok(())
    }

    async fn update(&self, doc: &Document) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_err("begin transaction"))?;

        let previous = sqlx::query(&format!("{} WHERE name = $1 FOR UPDATE", SELECT_DOCUMENT))
            .bind(doc.name().as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("fetch document"))?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DocumentNotFound,
                    format!("Document not found: {}", doc.name()),
                )
            })?;
        let previous = row_to_document(&previous)?;

        sqlx::query(
            "INSERT INTO document_history (name, snapshot, recorded_at) VALUES ($1, $2, $3)",
        )
        .bind(doc.name().as_str())
        .bind(to_json(&previous)?)
        .bind(Timestamp::now().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_err("insert document history"))?;

        sqlx::query(
            r#"
            UPDATE documents SET
                title = $2,
                rev = $3,
                state_type = $4,
                state = $5,
                group_acronym = $6,
                stream = $7,
                ad = $8,
                notify = $9,
                intended_std_level = $10,
                updated_at = $11
            WHERE name = $1
            "#,
        )
        .bind(doc.name().as_str())
        .bind(doc.title())
        .bind(doc.rev().to_string())
        .bind(doc.state().state_type())
        .bind(doc.state().slug())
        .bind(doc.group().map(|g| g.as_str().to_string()))
        .bind(enum_to_str(&doc.stream())?)
        .bind(doc.ad().map(|id| *id.as_uuid()))
        .bind(doc.notify().to_vec())
        .bind(doc.intended_std_level().map(|l| enum_to_str(&l)).transpose()?)
        .bind(doc.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_err("update document"))?;

        tx.commit().await.map_err(db_err("commit document update"))?;
        Ok(())
    }

    async fn find_by_name(&self, name: &DocName) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE name = $1", SELECT_DOCUMENT))
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("fetch document"))?;

        row.as_ref().map(row_to_document).transpose()
    }

    async fn exists(&self, name: &DocName) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM documents WHERE name = $1")
            .bind(name.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(db_err("check document existence"))?;

        Ok(result.0 > 0)
    }

    async fn history(&self, name: &DocName) -> Result<Vec<DocHistory>, DomainError> {
        let rows = sqlx::query(
            "SELECT snapshot, recorded_at FROM document_history WHERE name = $1 ORDER BY id",
        )
        .bind(name.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("fetch document history"))?;

        rows.iter()
            .map(|row| {
                let snapshot: serde_json::Value = column(row, "snapshot")?;
                let recorded_at: chrono::DateTime<chrono::Utc> = column(row, "recorded_at")?;
                Ok(DocHistory::reconstitute(
                    from_json("snapshot", snapshot)?,
                    Timestamp::from_datetime(recorded_at),
                ))
            })
            .collect()
    }
}

fn state_from_columns(state_type: &str, state: &str) -> Result<DocState, DomainError> {
    match state_type {
        "draft-iesg" => Ok(DocState::DraftIesg(stored("state", IesgState::from_slug(state))?)),
        "charter" => Ok(DocState::Charter(stored("state", CharterState::from_slug(state))?)),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid state_type: {}", other),
        )),
    }
}

fn row_to_document(row: &PgRow) -> Result<Document, DomainError> {
    let name: String = column(row, "name")?;
    let doc_type: String = column(row, "doc_type")?;
    let rev: String = column(row, "rev")?;
    let state_type: String = column(row, "state_type")?;
    let state: String = column(row, "state")?;
    let group: Option<String> = column(row, "group_acronym")?;
    let stream: String = column(row, "stream")?;
    let ad: Option<uuid::Uuid> = column(row, "ad")?;
    let level: Option<String> = column(row, "intended_std_level")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Document::reconstitute(
        stored("name", DocName::new(name))?,
        enum_from_str("doc_type", &doc_type)?,
        column(row, "title")?,
        stored("rev", Revision::parse(&rev))?,
        state_from_columns(&state_type, &state)?,
        group.map(|g| stored("group_acronym", GroupAcronym::new(g))).transpose()?,
        enum_from_str("stream", &stream)?,
        ad.map(PersonId::from_uuid),
        column(row, "notify")?,
        level.map(|l| enum_from_str("intended_std_level", &l)).transpose()?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
