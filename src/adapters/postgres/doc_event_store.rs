//! PostgreSQL DocEvent store.
//!
//! Event ids come from the `doc_events.id` sequence, so they increase in
//! insertion order across all documents.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::doc_event::{DocEvent, DocEventKind, NewDocEvent};
use crate::domain::document::Revision;
use crate::domain::foundation::{DocEventId, DocName, DomainError, PersonId, Timestamp};
use crate::ports::DocEventStore;

use super::codec::{column, db_err, from_json, stored, to_json};

#[derive(Clone)]
pub struct PostgresDocEventStore {
    pool: PgPool,
}

impl PostgresDocEventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocEventStore for PostgresDocEventStore {
    async fn append(&self, event: NewDocEvent) -> Result<DocEvent, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO doc_events (doc, rev, time, by_person, event_type, descr, kind)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(event.doc.as_str())
        .bind(event.rev.to_string())
        .bind(event.time.as_datetime())
        .bind(event.by.as_uuid())
        .bind(event.kind.event_type().slug())
        .bind(&event.desc)
        .bind(to_json(&event.kind)?)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err("insert doc event"))?;

        Ok(event.into_event(DocEventId::from_raw(id)))
    }

    async fn events_for(&self, doc: &DocName) -> Result<Vec<DocEvent>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, rev, time, by_person, descr, kind
            FROM doc_events
            WHERE doc = $1
            ORDER BY time, id
            "#,
        )
        .bind(doc.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("fetch doc events"))?;

        rows.iter()
            .map(|row| {
                let rev: String = column(row, "rev")?;
                let time: chrono::DateTime<chrono::Utc> = column(row, "time")?;
                let by: uuid::Uuid = column(row, "by_person")?;
                let kind: serde_json::Value = column(row, "kind")?;
                Ok(DocEvent {
                    id: DocEventId::from_raw(column(row, "id")?),
                    doc: doc.clone(),
                    rev: stored("rev", Revision::parse(&rev))?,
                    time: Timestamp::from_datetime(time),
                    by: PersonId::from_uuid(by),
                    desc: column(row, "descr")?,
                    kind: from_json::<DocEventKind>("kind", kind)?,
                })
            })
            .collect()
    }
}
