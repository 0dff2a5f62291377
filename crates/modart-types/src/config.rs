//! Storage configuration types for Modart.
//!
//! `StorageConfig` selects one backend at process start. It is assembled by
//! the binary from CLI flags and environment variables and handed to
//! `modart_infra::backend::open_repositories`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Which storage backend the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite via sqlx (embedded, file-backed).
    Relational,
    /// PostgreSQL via sqlx, addressed by host, port, user and database name.
    Postgres,
    /// DynamoDB key-value tables.
    Dynamodb,
    /// In-process key-value tables (lost on exit).
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Relational => write!(f, "relational"),
            StorageBackend::Postgres => write!(f, "postgres"),
            StorageBackend::Dynamodb => write!(f, "dynamodb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relational" | "sqlite" => Ok(StorageBackend::Relational),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "dynamodb" | "key-value" => Ok(StorageBackend::Dynamodb),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("invalid storage backend: '{other}'")),
        }
    }
}

/// Connection pool limits for the relational backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on reader connections.
    pub max_connections: u32,
    /// Connections older than this are closed and replaced.
    pub max_lifetime: Duration,
    /// Idle connections are closed after this long.
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 8,
            max_lifetime: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(30),
        }
    }
}

/// Connection parameters for a PostgreSQL server.
#[derive(Clone, PartialEq, Eq)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "modart".to_string(),
        }
    }
}

impl fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Per-entity table names for the key-value backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvTables {
    pub authors: String,
    pub articles: String,
}

impl KvTables {
    /// Table that holds records of the given family.
    pub fn table(&self, kind: EntityKind) -> &str {
        match kind {
            EntityKind::Author => &self.authors,
            EntityKind::Article => &self.articles,
        }
    }
}

impl Default for KvTables {
    fn default() -> Self {
        Self {
            authors: "Users".to_string(),
            articles: "Articles".to_string(),
        }
    }
}

/// Fully resolved storage configuration.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Relational {
        database_url: String,
        pool: PoolSettings,
    },
    Postgres {
        connection: PostgresSettings,
        pool: PoolSettings,
    },
    Dynamodb {
        tables: KvTables,
        /// Endpoint override (e.g. DynamoDB Local); `None` uses the AWS default.
        endpoint: Option<String>,
    },
    Memory {
        tables: KvTables,
    },
}

impl StorageConfig {
    pub fn backend(&self) -> StorageBackend {
        match self {
            StorageConfig::Relational { .. } => StorageBackend::Relational,
            StorageConfig::Postgres { .. } => StorageBackend::Postgres,
            StorageConfig::Dynamodb { .. } => StorageBackend::Dynamodb,
            StorageConfig::Memory { .. } => StorageBackend::Memory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_roundtrip() {
        for backend in [
            StorageBackend::Relational,
            StorageBackend::Postgres,
            StorageBackend::Dynamodb,
            StorageBackend::Memory,
        ] {
            let parsed: StorageBackend = backend.to_string().parse().unwrap();
            assert_eq!(backend, parsed);
        }
    }

    #[test]
    fn test_storage_backend_aliases() {
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Relational);
        assert_eq!("key-value".parse::<StorageBackend>().unwrap(), StorageBackend::Dynamodb);
        assert_eq!("postgresql".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert!("mongodb".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_default_table_names() {
        let tables = KvTables::default();
        assert_eq!(tables.table(EntityKind::Author), "Users");
        assert_eq!(tables.table(EntityKind::Article), "Articles");
    }

    #[test]
    fn test_postgres_settings_debug_hides_password() {
        let settings = PostgresSettings {
            password: "hunter2".to_string(),
            ..PostgresSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(rendered.contains("localhost"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_pool_settings_defaults() {
        let pool = PoolSettings::default();
        assert_eq!(pool.max_connections, 8);
        assert_eq!(pool.max_lifetime, Duration::from_secs(30));
    }
}
