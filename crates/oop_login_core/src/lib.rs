//! Data-access core for the OOP login sample: user and login records, field
//! validation, and SQLite table gateways for `users` and `logins`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod validate;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::login::Login;
pub use model::user::User;
pub use model::RecordId;
pub use repo::error::{RepoError, RepoResult};
pub use repo::login_repo::{LoginRepository, SqliteLoginRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use validate::{
    parse_int, validate_datetime, validate_int, validate_varchar, ValidationError,
};

