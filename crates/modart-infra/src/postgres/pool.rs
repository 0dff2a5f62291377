//! PostgreSQL connection pool.

use modart_types::config::{PoolSettings, PostgresSettings};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

/// Connect options for the configured server.
pub fn connect_options(settings: &PostgresSettings) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database)
}

/// Open a bounded pool and run the embedded migrations.
pub async fn connect(
    settings: &PostgresSettings,
    pool: &PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    let pg = PgPoolOptions::new()
        .max_connections(pool.max_connections.max(1))
        .max_lifetime(pool.max_lifetime)
        .idle_timeout(pool.idle_timeout)
        .connect_with(connect_options(settings))
        .await?;

    sqlx::migrate!("../../migrations").run(&pg).await?;

    tracing::debug!(
        host = %settings.host,
        port = settings.port,
        database = %settings.database,
        max_connections = pool.max_connections,
        "postgres pool opened"
    );
    Ok(pg)
}

/// Pool for the live tests, read from `MODART_TEST_POSTGRES_URL`.
#[cfg(test)]
pub(crate) async fn test_pool() -> PgPool {
    let url = std::env::var("MODART_TEST_POSTGRES_URL")
        .expect("MODART_TEST_POSTGRES_URL must point at a disposable database");
    let pool = PgPool::connect(&url).await.unwrap();
    sqlx::migrate!("../../migrations").run(&pool).await.unwrap();
    pool
}
