//! Startup-time backend selection.
//!
//! Builds both repositories for the configured backend and erases their
//! concrete types, so the rest of the process never branches on which
//! storage it runs against.

use modart_core::repository::boxed::{BoxArticleRepository, BoxAuthorRepository};
use modart_types::config::StorageConfig;
use modart_types::entity::EntityKind;
use modart_types::error::RepositoryError;

use crate::kv::article::KvArticleRepository;
use crate::kv::author::KvAuthorRepository;
use crate::kv::{DynamoTable, MemoryTable};
use crate::postgres::article::PgArticleRepository;
use crate::postgres::author::PgAuthorRepository;
use crate::sqlite::article::SqliteArticleRepository;
use crate::sqlite::author::SqliteAuthorRepository;
use crate::sqlite::pool::DatabasePool;

/// Repositories for one storage backend.
#[derive(Clone)]
pub struct Repositories {
    pub authors: BoxAuthorRepository,
    pub articles: BoxArticleRepository,
}

/// Open the configured backend. SQLite and PostgreSQL are migrated before
/// this returns; key-value tables must already exist.
pub async fn open_repositories(config: &StorageConfig) -> Result<Repositories, RepositoryError> {
    let repos = match config {
        StorageConfig::Relational { database_url, pool } => {
            let pool = DatabasePool::new(database_url, pool)
                .await
                .map_err(|e| RepositoryError::Connection(e.to_string()))?;
            Repositories {
                authors: BoxAuthorRepository::new(SqliteAuthorRepository::new(pool.clone())),
                articles: BoxArticleRepository::new(SqliteArticleRepository::new(pool)),
            }
        }
        StorageConfig::Postgres { connection, pool } => {
            let pool = crate::postgres::pool::connect(connection, pool)
                .await
                .map_err(|e| RepositoryError::Connection(e.to_string()))?;
            Repositories {
                authors: BoxAuthorRepository::new(PgAuthorRepository::new(pool.clone())),
                articles: BoxArticleRepository::new(PgArticleRepository::new(pool)),
            }
        }
        StorageConfig::Dynamodb { tables, endpoint } => {
            let engine = DynamoTable::connect(endpoint.as_deref()).await;
            Repositories {
                authors: BoxAuthorRepository::new(KvAuthorRepository::new(
                    engine.clone(),
                    tables.table(EntityKind::Author),
                )),
                articles: BoxArticleRepository::new(KvArticleRepository::new(
                    engine,
                    tables.table(EntityKind::Article),
                )),
            }
        }
        StorageConfig::Memory { tables } => {
            let engine = MemoryTable::new();
            Repositories {
                authors: BoxAuthorRepository::new(KvAuthorRepository::new(
                    engine.clone(),
                    tables.table(EntityKind::Author),
                )),
                articles: BoxArticleRepository::new(KvArticleRepository::new(
                    engine,
                    tables.table(EntityKind::Article),
                )),
            }
        }
    };

    tracing::info!(backend = %config.backend(), "storage backend opened");
    Ok(repos)
}
