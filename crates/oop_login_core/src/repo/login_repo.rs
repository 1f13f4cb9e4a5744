//! Logins gateway contract and SQLite implementation.
//!
//! # Invariants
//! - `user_id` and every id argument must lie in `[0, 4294967295]`.
//! - `time` must be a canonical `YYYY-MM-DD HH:MM:SS` datetime.
//! - `user_id` is not checked against `users`; logins reference users by
//!   value only.

use crate::model::login::Login;
use crate::model::RecordId;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::schema::ensure_table_ready;
use crate::validate::{validate_datetime, validate_id, validate_int};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const LOGIN_SELECT_SQL: &str = "SELECT id, user_id, time FROM logins";
const LOGIN_COLUMNS: &[&str] = &["id", "user_id", "time"];

/// Gateway interface for the `logins` table.
pub trait LoginRepository {
    /// Records a login and returns the store-assigned id.
    fn create(&self, login: &Login) -> RepoResult<RecordId>;
    /// Lists all logins in insertion order.
    fn read(&self) -> RepoResult<Vec<Login>>;
    fn read_by_id(&self, id: RecordId) -> RepoResult<Option<Login>>;
    /// Lists the logins of one user in insertion order.
    fn read_by_user_id(&self, user_id: RecordId) -> RepoResult<Vec<Login>>;
    fn delete(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed logins gateway.
pub struct SqliteLoginRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLoginRepository<'conn> {
    /// Wraps a connection that exposes the `logins` table.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "logins", LOGIN_COLUMNS)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }
}

impl LoginRepository for SqliteLoginRepository<'_> {
    fn create(&self, login: &Login) -> RepoResult<RecordId> {
        validate_int(login.user_id(), "user id")?;
        validate_datetime(login.time(), "time")?;

        self.conn.execute(
            "INSERT INTO logins (user_id, time) VALUES (?1, ?2);",
            params![login.user_id(), login.time()],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(
            "event=login_create module=repo status=ok id={id} user_id={}",
            login.user_id()
        );
        Ok(id)
    }

    fn read(&self) -> RepoResult<Vec<Login>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOGIN_SELECT_SQL} ORDER BY id ASC;"))?;
        let logins = stmt
            .query_map([], parse_login_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logins)
    }

    fn read_by_id(&self, id: RecordId) -> RepoResult<Option<Login>> {
        validate_id(id)?;

        let login = self
            .conn
            .query_row(
                &format!("{LOGIN_SELECT_SQL} WHERE id = ?1 LIMIT 1;"),
                [id],
                parse_login_row,
            )
            .optional()?;
        Ok(login)
    }

    fn read_by_user_id(&self, user_id: RecordId) -> RepoResult<Vec<Login>> {
        validate_int(user_id, "user id")?;

        let mut stmt = self.conn.prepare(&format!(
            "{LOGIN_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"
        ))?;
        let logins = stmt
            .query_map([user_id], parse_login_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logins)
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        validate_id(id)?;

        let changed = self
            .conn
            .execute("DELETE FROM logins WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "login",
                id,
            });
        }

        info!("event=login_delete module=repo status=ok id={id}");
        Ok(())
    }
}

fn parse_login_row(row: &Row<'_>) -> rusqlite::Result<Login> {
    Ok(Login::with_id(
        row.get::<_, i64>("id")?,
        row.get::<_, i64>("user_id")?,
        row.get::<_, String>("time")?,
    ))
}
