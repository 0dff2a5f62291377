//! Cryptographic operations for Modart.
//!
//! - `password`: Argon2id password digests
//! - `jwt`: HS256 session tokens

pub mod jwt;
pub mod password;
