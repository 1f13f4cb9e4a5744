//! Users gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `users` table.
//! - Translate UNIQUE violations on `username`/`email` into
//!   `RepoError::DuplicateUsername` / `RepoError::DuplicateEmail`.
//!
//! # Invariants
//! - `username`, `email` and `password` are validated as `VARCHAR(255)` before
//!   every write and every lookup by value.
//! - Field values are never written to logs.

use crate::model::user::User;
use crate::model::RecordId;
use crate::repo::error::{translate_users_write_error, RepoError, RepoResult};
use crate::repo::schema::ensure_table_ready;
use crate::validate::{validate_id, validate_varchar};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT id, username, email, password FROM users";
const USER_COLUMNS: &[&str] = &["id", "username", "email", "password"];

/// Gateway interface for the `users` table.
pub trait UserRepository {
    /// Inserts a new user and returns the store-assigned id.
    ///
    /// Any id already set on `user` is ignored.
    fn create(&self, user: &User) -> RepoResult<RecordId>;
    /// Lists all users in insertion order.
    fn read(&self) -> RepoResult<Vec<User>>;
    fn read_by_username(&self, username: &str) -> RepoResult<Option<User>>;
    fn read_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn read_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;
    fn update_username(&self, id: RecordId, username: &str) -> RepoResult<()>;
    fn update_email(&self, id: RecordId, email: &str) -> RepoResult<()>;
    fn update_password(&self, id: RecordId, password: &str) -> RepoResult<()>;
    fn delete(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed users gateway.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection that exposes the `users` table.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the connection
    ///   was not bootstrapped with the users schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }

    /// Returns the wrapped connection.
    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    fn read_one(&self, filter: &str, value: &dyn rusqlite::ToSql) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE {filter} = ?1 LIMIT 1;"),
                [value],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Updates one column of one row; zero affected rows means the id is absent.
    fn update_column(&self, id: RecordId, column: &'static str, value: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                &format!("UPDATE users SET {column} = ?1 WHERE id = ?2;"),
                params![value, id],
            )
            .map_err(translate_users_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        info!("event=user_update module=repo status=ok id={id} column={column}");
        Ok(())
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create(&self, user: &User) -> RepoResult<RecordId> {
        validate_varchar(user.username(), "username")?;
        validate_varchar(user.email(), "email")?;
        validate_varchar(user.password(), "password")?;

        self.conn
            .execute(
                "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3);",
                params![user.username(), user.email(), user.password()],
            )
            .map_err(|err| {
                let err = translate_users_write_error(err);
                debug!("event=user_create module=repo status=error error={err}");
                err
            })?;

        let id = self.conn.last_insert_rowid();
        info!("event=user_create module=repo status=ok id={id}");
        Ok(id)
    }

    fn read(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let users = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn read_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        validate_varchar(username, "username")?;
        self.read_one("username", &username)
    }

    fn read_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        validate_varchar(email, "email")?;
        self.read_one("email", &email)
    }

    fn read_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        validate_id(id)?;
        self.read_one("id", &id)
    }

    fn update_username(&self, id: RecordId, username: &str) -> RepoResult<()> {
        validate_varchar(username, "username")?;
        validate_id(id)?;
        self.update_column(id, "username", username)
    }

    fn update_email(&self, id: RecordId, email: &str) -> RepoResult<()> {
        validate_varchar(email, "email")?;
        validate_id(id)?;
        self.update_column(id, "email", email)
    }

    fn update_password(&self, id: RecordId, password: &str) -> RepoResult<()> {
        validate_varchar(password, "password")?;
        validate_id(id)?;
        self.update_column(id, "password", password)
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        validate_id(id)?;

        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        info!("event=user_delete module=repo status=ok id={id}");
        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User::with_id(
        row.get::<_, i64>("id")?,
        row.get::<_, String>("username")?,
        row.get::<_, String>("email")?,
        row.get::<_, String>("password")?,
    ))
}
