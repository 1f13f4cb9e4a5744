//! Table gateways over the `users` and `logins` relations.
//!
//! # Responsibility
//! - Define the CRUD contracts used by the login/registration flow.
//! - Keep SQL and constraint-violation details inside this module.
//!
//! # Invariants
//! - Every argument is validated before a statement is prepared.
//! - Update/delete by id return `RepoError::NotFound` when no row matched.

pub mod error;
pub mod login_repo;
pub mod user_repo;

mod schema;
