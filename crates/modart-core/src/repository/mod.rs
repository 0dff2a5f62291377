//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (modart-infra) implements. Every backend honors the same contract:
//!
//! - `create` writes exactly one new record or fails with `NotCreated`.
//! - `get_by_id` returns `Ok(None)` on absence.
//! - `list` returns the full set in no particular order; empty is not an error.
//! - `update` replaces the mutable fields of an existing record, or fails
//!   with `NotUpdated`. It never inserts.
//! - `delete` removes one record, or fails with `NotDeleted`.

pub mod article;
pub mod author;
pub mod boxed;
