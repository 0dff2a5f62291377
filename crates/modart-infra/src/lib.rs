//! Infrastructure layer for Modart.
//!
//! Contains implementations of the ports defined in `modart-core`: SQLite
//! and PostgreSQL storage, key-value storage (DynamoDB or in-process
//! tables), Argon2 password hashing and JWT session tokens.

pub mod backend;
pub mod crypto;
pub mod kv;
pub mod postgres;
pub mod sqlite;
