//! PostgreSQL storage layer.
//!
//! Same schema and repository contract as the SQLite layer, over a single
//! bounded `PgPool`. The server is addressed by host, port, user, password
//! and database name rather than a URL.

pub mod article;
pub mod author;
pub mod pool;
