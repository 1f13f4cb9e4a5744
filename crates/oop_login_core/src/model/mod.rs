//! Record types persisted by the table gateways.
//!
//! # Invariants
//! - `id` is `None` until the store assigns a surrogate key.
//! - Records carry no back-references; gateways own persisted state.

pub mod login;
pub mod user;

/// Surrogate key assigned by the store.
///
/// Kept signed so callers can hand over unchecked input; gateways reject
/// values outside `[0, 4294967295]`.
pub type RecordId = i64;
