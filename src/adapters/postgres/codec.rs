//! Row decoding helpers shared by the PostgreSQL adapters.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Maps a sqlx error into a database `DomainError` with context.
pub(super) fn db_err(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(context, e)
}

/// Reads a column, naming it in the error on failure.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// Serde name of a unit enum variant, e.g. `GroupState::Active` -> `active`.
pub(super) fn enum_to_str<T: Serialize>(value: &T) -> Result<String, DomainError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        Ok(other) => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("Expected a string-encoded enum, got {}", other),
        )),
        Err(e) => Err(DomainError::new(ErrorCode::InternalError, e.to_string())),
    }
}

pub(super) fn enum_from_str<T: DeserializeOwned>(column: &str, value: &str) -> Result<T, DomainError> {
    serde_json::from_value(serde_json::Value::String(value.to_string())).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} '{}': {}", column, value, e),
        )
    })
}

pub(super) fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))
}

pub(super) fn from_json<T: DeserializeOwned>(
    column: &str,
    value: serde_json::Value,
) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} payload: {}", column, e),
        )
    })
}

/// Re-validates a stored identifier, treating failure as corrupt data.
pub(super) fn stored<T, E: std::fmt::Display>(column: &str, parsed: Result<T, E>) -> Result<T, DomainError> {
    parsed.map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {}: {}", column, e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ballot::BallotType;
    use crate::domain::group::GroupState;

    #[test]
    fn enum_strings_use_serde_names() {
        assert_eq!(enum_to_str(&GroupState::Conclude).unwrap(), "conclude");
        assert_eq!(enum_to_str(&BallotType::CharterApprove).unwrap(), "charter-approve");
        let state: GroupState = enum_from_str("state", "proposed").unwrap();
        assert_eq!(state, GroupState::Proposed);
    }

    #[test]
    fn unknown_enum_string_is_a_database_error() {
        let err = enum_from_str::<GroupState>("state", "bogus").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("bogus"));
    }
}
