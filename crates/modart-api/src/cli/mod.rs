//! Command-line and environment configuration for the `modart` binary.
//!
//! Every flag can also be set through the environment variable named in its
//! `env` attribute. Values are read once at startup.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use modart_infra::sqlite::pool::{default_data_dir, default_database_url};
use modart_observe::tracing_setup::{LogFormat, TracingOptions};
use modart_types::config::{
    KvTables, PoolSettings, PostgresSettings, StorageBackend, StorageConfig,
};

/// Cookie lifetime when none is configured: 30 days.
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u32 = 60 * 60 * 24 * 30;

/// Serve the authors and articles REST API.
#[derive(Parser, Debug)]
#[command(name = "modart", version, about, long_about = None)]
pub struct Cli {
    /// Host to bind to.
    #[arg(long, env = "MODART_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "MODART_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Storage backend: relational (SQLite), postgres, dynamodb or memory.
    #[arg(long, env = "MODART_BACKEND", default_value_t = StorageBackend::Relational)]
    pub backend: StorageBackend,

    /// SQLite URL. Defaults to `modart.db` inside the data directory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Directory for local state (default: ~/.modart).
    #[arg(long, env = "MODART_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL server host.
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// PostgreSQL server port.
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// PostgreSQL user.
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// PostgreSQL password.
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true, default_value = "")]
    pub db_password: String,

    /// PostgreSQL database name.
    #[arg(long, env = "DB_NAME", default_value = "modart")]
    pub db_name: String,

    /// Maximum connections in the SQL pool (SQLite readers, PostgreSQL total).
    #[arg(long, env = "MODART_DB_MAX_CONNECTIONS", default_value_t = 8)]
    pub max_connections: u32,

    /// Seconds before a pooled connection is replaced.
    #[arg(long, env = "MODART_DB_MAX_LIFETIME_SECS", default_value_t = 30)]
    pub max_lifetime_secs: u64,

    /// Seconds an idle pooled connection is kept.
    #[arg(long, env = "MODART_DB_IDLE_TIMEOUT_SECS", default_value_t = 30)]
    pub idle_timeout_secs: u64,

    /// Key-value table holding authors.
    #[arg(long, env = "MODART_AUTHORS_TABLE", default_value = "Users")]
    pub authors_table: String,

    /// Key-value table holding articles.
    #[arg(long, env = "MODART_ARTICLES_TABLE", default_value = "Articles")]
    pub articles_table: String,

    /// DynamoDB endpoint override, e.g. http://localhost:8000 for DynamoDB Local.
    #[arg(long, env = "MODART_DYNAMODB_ENDPOINT")]
    pub dynamodb_endpoint: Option<String>,

    /// Max-Age of the session cookie set on login.
    #[arg(long, env = "MODART_COOKIE_MAX_AGE_SECS", default_value_t = DEFAULT_COOKIE_MAX_AGE_SECS)]
    pub cookie_max_age_secs: u32,

    /// Log output format: text or json.
    #[arg(long, env = "MODART_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, env = "MODART_OTEL")]
    pub otel: bool,

    /// Detailed output (-v for debug, -vv for trace). `RUST_LOG` wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    fn kv_tables(&self) -> KvTables {
        KvTables {
            authors: self.authors_table.clone(),
            articles: self.articles_table.clone(),
        }
    }

    fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            max_lifetime: Duration::from_secs(self.max_lifetime_secs),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
        }
    }

    /// Resolve the selected backend and its settings.
    pub fn storage_config(&self) -> StorageConfig {
        match self.backend {
            StorageBackend::Relational => StorageConfig::Relational {
                database_url: self
                    .database_url
                    .clone()
                    .unwrap_or_else(|| default_database_url(&self.data_dir())),
                pool: self.pool_settings(),
            },
            StorageBackend::Postgres => StorageConfig::Postgres {
                connection: PostgresSettings {
                    host: self.db_host.clone(),
                    port: self.db_port,
                    user: self.db_user.clone(),
                    password: self.db_password.clone(),
                    database: self.db_name.clone(),
                },
                pool: self.pool_settings(),
            },
            StorageBackend::Dynamodb => StorageConfig::Dynamodb {
                tables: self.kv_tables(),
                endpoint: self.dynamodb_endpoint.clone(),
            },
            StorageBackend::Memory => StorageConfig::Memory {
                tables: self.kv_tables(),
            },
        }
    }

    pub fn tracing_options(&self) -> TracingOptions {
        TracingOptions {
            format: self.log_format,
            verbosity: self.verbose,
            enable_otel: self.otel,
        }
    }
}
