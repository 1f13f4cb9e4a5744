//! Gateway error type and store-error translation.
//!
//! # Invariants
//! - Validation failures never reach the store.
//! - Only UNIQUE violations on `users.username` / `users.email` are
//!   translated; every other store error is returned as `RepoError::Db`.

use crate::db::DbError;
use crate::model::RecordId;
use crate::validate::ValidationError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by the `users` and `logins` gateways.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// No row with this id exists in the named table.
    NotFound {
        entity: &'static str,
        id: RecordId,
    },
    DuplicateUsername,
    DuplicateEmail,
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateUsername => write!(f, "the username is already in the database"),
            Self::DuplicateEmail => write!(f, "the email is already in the database"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Unique column of `users` reported in a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UniqueColumn {
    Username,
    Email,
}

/// Translates a write failure on `users` into a duplicate-key error.
///
/// SQLite reports UNIQUE violations as `UNIQUE constraint failed: users.<column>`;
/// the column name decides the variant.
pub(crate) fn translate_users_write_error(err: rusqlite::Error) -> RepoError {
    match violated_unique_column(&err) {
        Some(UniqueColumn::Username) => RepoError::DuplicateUsername,
        Some(UniqueColumn::Email) => RepoError::DuplicateEmail,
        None => err.into(),
    }
}

pub(crate) fn violated_unique_column(err: &rusqlite::Error) -> Option<UniqueColumn> {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, Some(message))
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            if message.contains("users.username") {
                Some(UniqueColumn::Username)
            } else if message.contains("users.email") {
                Some(UniqueColumn::Email)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(extended_code: i32, message: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(
            ffi::Error {
                code: rusqlite::ErrorCode::ConstraintViolation,
                extended_code,
            },
            Some(message.to_string()),
        )
    }

    #[test]
    fn unique_username_violation_maps_to_duplicate_username() {
        let err = sqlite_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: users.username",
        );
        assert!(matches!(
            translate_users_write_error(err),
            RepoError::DuplicateUsername
        ));
    }

    #[test]
    fn unique_email_violation_maps_to_duplicate_email() {
        let err = sqlite_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: users.email",
        );
        assert!(matches!(
            translate_users_write_error(err),
            RepoError::DuplicateEmail
        ));
    }

    #[test]
    fn other_unique_violation_propagates_store_error() {
        let err = sqlite_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: users.nickname",
        );
        assert!(matches!(
            translate_users_write_error(err),
            RepoError::Db(DbError::Sqlite(_))
        ));
    }

    #[test]
    fn non_unique_constraint_propagates_store_error() {
        let err = sqlite_failure(
            ffi::SQLITE_CONSTRAINT_NOTNULL,
            "NOT NULL constraint failed: users.username",
        );
        assert_eq!(violated_unique_column(&err), None);
        assert!(matches!(
            translate_users_write_error(err),
            RepoError::Db(_)
        ));
    }

    #[test]
    fn not_found_display_names_entity_and_id() {
        let err = RepoError::NotFound {
            entity: "user",
            id: 42,
        };
        assert_eq!(err.to_string(), "user not found: 42");
    }
}
