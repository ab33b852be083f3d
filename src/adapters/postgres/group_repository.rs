//! PostgreSQL implementation of GroupRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::collections::BTreeSet;

use crate::domain::foundation::{
    DocName, DomainError, ErrorCode, GroupAcronym, MilestoneId, PersonId, Timestamp,
};
use crate::domain::group::{Group, GroupEvent, GroupEventKind, Milestone, Role};
use crate::ports::GroupRepository;

use super::codec::{column, db_err, enum_from_str, enum_to_str, from_json, stored, to_json};

#[derive(Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn save(&self, group: &Group) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO groups (
                acronym, name, group_type, state, parent, list_email, charter, roles, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (acronym) DO NOTHING
            "#,
        )
        .bind(group.acronym().as_str())
        .bind(group.name())
        .bind(enum_to_str(&group.group_type())?)
        .bind(enum_to_str(&group.state())?)
        .bind(group.parent().map(|p| p.as_str().to_string()))
        .bind(group.list_email())
        .bind(group.charter().map(|c| c.as_str().to_string()))
        .bind(to_json(&group.roles())?)
        .bind(group.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_err("insert group"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("Group already exists: {}", group.acronym()),
            ));
        }
        Ok(())
    }

    async fn update(&self, group: &Group) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE groups SET
                name = $2,
                state = $3,
                parent = $4,
                list_email = $5,
                charter = $6,
                roles = $7,
                updated_at = $8
            WHERE acronym = $1
            "#,
        )
        .bind(group.acronym().as_str())
        .bind(group.name())
        .bind(enum_to_str(&group.state())?)
        .bind(group.parent().map(|p| p.as_str().to_string()))
        .bind(group.list_email())
        .bind(group.charter().map(|c| c.as_str().to_string()))
        .bind(to_json(&group.roles())?)
        .bind(group.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_err("update group"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::GroupNotFound,
                format!("Group not found: {}", group.acronym()),
            ));
        }
        Ok(())
    }

    async fn find_by_acronym(&self, acronym: &GroupAcronym) -> Result<Option<Group>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT acronym, name, group_type, state, parent, list_email, charter, roles, updated_at
            FROM groups
            WHERE acronym = $1
            "#,
        )
        .bind(acronym.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err("fetch group"))?;

        row.as_ref().map(row_to_group).transpose()
    }

    async fn milestones(&self, acronym: &GroupAcronym) -> Result<Vec<Milestone>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_acronym, descr, due, docs, state, resolved
            FROM group_milestones
            WHERE group_acronym = $1
            ORDER BY due, descr
            "#,
        )
        .bind(acronym.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("fetch milestones"))?;

        rows.iter().map(row_to_milestone).collect()
    }

    async fn save_milestone(&self, milestone: &Milestone) -> Result<(), DomainError> {
        let docs: Vec<String> = milestone.docs.iter().map(|d| d.as_str().to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO group_milestones (id, group_acronym, descr, due, docs, state, resolved)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                descr = EXCLUDED.descr,
                due = EXCLUDED.due,
                docs = EXCLUDED.docs,
                state = EXCLUDED.state,
                resolved = EXCLUDED.resolved
            "#,
        )
        .bind(milestone.id.as_uuid())
        .bind(milestone.group.as_str())
        .bind(&milestone.desc)
        .bind(milestone.due)
        .bind(docs)
        .bind(milestone.state.slug())
        .bind(milestone.resolved.as_deref())
        .execute(&self.pool)
        .await
        .map_err(db_err("save milestone"))?;

        Ok(())
    }

    async fn append_event(&self, event: &GroupEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO group_events (group_acronym, time, by_person, descr, kind)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event.group.as_str())
        .bind(event.time.as_datetime())
        .bind(event.by.as_uuid())
        .bind(&event.desc)
        .bind(to_json(&event.kind)?)
        .execute(&self.pool)
        .await
        .map_err(db_err("insert group event"))?;

        Ok(())
    }

    async fn events(&self, acronym: &GroupAcronym) -> Result<Vec<GroupEvent>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT time, by_person, descr, kind
            FROM group_events
            WHERE group_acronym = $1
            ORDER BY time, id
            "#,
        )
        .bind(acronym.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err("fetch group events"))?;

        rows.iter()
            .map(|row| {
                let time: chrono::DateTime<chrono::Utc> = column(row, "time")?;
                let by: uuid::Uuid = column(row, "by_person")?;
                let kind: serde_json::Value = column(row, "kind")?;
                Ok(GroupEvent {
                    group: acronym.clone(),
                    time: Timestamp::from_datetime(time),
                    by: PersonId::from_uuid(by),
                    desc: column(row, "descr")?,
                    kind: from_json::<GroupEventKind>("kind", kind)?,
                })
            })
            .collect()
    }
}

fn row_to_group(row: &PgRow) -> Result<Group, DomainError> {
    let acronym: String = column(row, "acronym")?;
    let group_type: String = column(row, "group_type")?;
    let state: String = column(row, "state")?;
    let parent: Option<String> = column(row, "parent")?;
    let charter: Option<String> = column(row, "charter")?;
    let roles: serde_json::Value = column(row, "roles")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Group::reconstitute(
        stored("acronym", GroupAcronym::new(acronym))?,
        column(row, "name")?,
        enum_from_str("group_type", &group_type)?,
        enum_from_str("state", &state)?,
        parent.map(|p| stored("parent", GroupAcronym::new(p))).transpose()?,
        from_json::<Vec<Role>>("roles", roles)?,
        column(row, "list_email")?,
        charter.map(|c| stored("charter", DocName::new(c))).transpose()?,
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_milestone(row: &PgRow) -> Result<Milestone, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let group: String = column(row, "group_acronym")?;
    let docs: Vec<String> = column(row, "docs")?;
    let state: String = column(row, "state")?;

    let docs = docs
        .into_iter()
        .map(|d| stored("docs", DocName::new(d)))
        .collect::<Result<BTreeSet<_>, _>>()?;
    let state = crate::domain::group::MilestoneState::from_slug(&state).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid milestone state: {}", state),
        )
    })?;

    Ok(Milestone {
        id: MilestoneId::from_uuid(id),
        group: stored("group_acronym", GroupAcronym::new(group))?,
        desc: column(row, "descr")?,
        due: column(row, "due")?,
        docs,
        state,
        resolved: column(row, "resolved")?,
    })
}
