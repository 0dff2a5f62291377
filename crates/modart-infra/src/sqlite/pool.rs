//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. `DatabasePool` pairs a bounded
//! reader pool for concurrent SELECTs with a single-connection writer pool
//! for serialized INSERT/UPDATE/DELETE. Connections are recycled after
//! `max_lifetime` and closed after sitting idle for `idle_timeout`.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use modart_types::config::PoolSettings;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Split read/write pool for SQLite with WAL mode.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools and run the embedded migrations on the writer.
    pub async fn new(database_url: &str, settings: &PoolSettings) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .max_lifetime(settings.max_lifetime)
            .idle_timeout(settings.idle_timeout)
            .connect_with(write_opts)
            .await?;

        // Schema must exist before the read-only pool connects
        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(settings.max_connections.max(1))
            .max_lifetime(settings.max_lifetime)
            .idle_timeout(settings.idle_timeout)
            .connect_with(read_opts)
            .await?;

        tracing::debug!(
            max_connections = settings.max_connections,
            "sqlite pools opened"
        );
        Ok(Self { reader, writer })
    }
}

/// `MODART_DATA_DIR` if set, else `~/.modart`.
pub fn default_data_dir() -> PathBuf {
    match std::env::var("MODART_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".modart")
        }
    }
}

/// SQLite URL for `modart.db` inside `data_dir`, created on first open.
pub fn default_database_url(data_dir: &Path) -> String {
    format!("sqlite://{}/modart.db?mode=rwc", data_dir.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open(name: &str) -> (DatabasePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join(name).display());
        let pool = DatabasePool::new(&url, &PoolSettings::default())
            .await
            .unwrap();
        (pool, dir)
    }

    #[tokio::test]
    async fn test_pool_creates_tables() {
        let (pool, _dir) = open("test.db").await;

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(table_names, vec!["articles", "authors"]);
    }

    #[tokio::test]
    async fn test_pool_creates_lookup_indexes() {
        let (pool, _dir) = open("test_idx.db").await;

        let indexes: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='index' AND name LIKE 'idx_%' ORDER BY name",
        )
        .fetch_all(&pool.reader)
        .await
        .unwrap();

        let names: Vec<&str> = indexes.iter().map(|t| t.0.as_str()).collect();
        assert_eq!(names, vec!["idx_articles_author_id", "idx_authors_email"]);
    }

    #[tokio::test]
    async fn test_pool_wal_mode() {
        let (pool, _dir) = open("test_wal.db").await;

        let result: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool.writer)
            .await
            .unwrap();

        assert_eq!(result.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("again.db").display());

        let first = DatabasePool::new(&url, &PoolSettings::default()).await.unwrap();
        first.writer.close().await;
        first.reader.close().await;
        DatabasePool::new(&url, &PoolSettings::default()).await.unwrap();
    }

    #[test]
    fn test_default_database_url() {
        let url = default_database_url(Path::new("/var/lib/modart"));
        assert_eq!(url, "sqlite:///var/lib/modart/modart.db?mode=rwc");
    }
}
