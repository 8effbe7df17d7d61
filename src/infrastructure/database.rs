//! Connection pool and schema management

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use crate::application::errors::RepositoryError;
use crate::config::DatabaseConfig;

/// Tables the service needs before it can accept traffic
pub const REQUIRED_TABLES: [&str; 5] = ["users", "packages", "bookings", "reviews", "booking_contacts"];

/// Process-scoped handle to the relational store. Cloning shares the pool;
/// every repository call checks a connection out and returns it when done.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the pool described by `config`. An in-memory URL gets a single
    /// connection that is never recycled, since each SQLite memory connection
    /// is its own database.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .foreign_keys(true)
            .create_if_missing(true);

        let in_memory = config.url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds));

        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(
            in_memory,
            max_connections = config.max_connections,
            "Database pool ready"
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        debug!("Migrations applied");
        Ok(())
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Whether every table in [`REQUIRED_TABLES`] exists
    pub async fn has_required_tables(&self) -> Result<bool, RepositoryError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table'")
                .fetch_all(&self.pool)
                .await?;

        Ok(REQUIRED_TABLES
            .iter()
            .all(|table| names.iter().any(|name| name == table)))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
