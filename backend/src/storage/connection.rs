use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

use super::error::StorageError;
use super::schema;

/// Process-wide handle. The cell holds the in-flight initialization as well as
/// its result, so concurrent first callers wait on one schema upgrade instead
/// of racing to create a second pool.
static SHARED: OnceCell<DbConnection> = OnceCell::const_new();

/// DbConnection owns the pool every repository reads and writes through
#[derive(Clone, Debug)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and upgrade its schema
    pub async fn new(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|source| unavailable(url, source))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        Self::connect(url, options, SqlitePoolOptions::new().max_connections(8)).await
    }

    /// A private in-memory database, used by tests and throwaway tooling.
    ///
    /// The pool keeps exactly one connection alive for its whole lifetime: an
    /// in-memory database disappears with its last connection.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let location = "sqlite::memory:";
        let options =
            SqliteConnectOptions::from_str(location).map_err(|source| unavailable(location, source))?;
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);

        Self::connect(location, options, pool_options).await
    }

    async fn connect(
        location: &str,
        options: SqliteConnectOptions,
        pool_options: SqlitePoolOptions,
    ) -> Result<Self, StorageError> {
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|source| unavailable(location, source))?;

        let previous_version = schema::upgrade(&pool)
            .await
            .map_err(|source| unavailable(location, source))?;

        info!(
            "Record store ready at {} (schema version {}, found {})",
            location,
            schema::SCHEMA_VERSION,
            previous_version
        );

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn unavailable(location: &str, source: sqlx::Error) -> StorageError {
    StorageError::Unavailable {
        location: location.to_string(),
        source,
    }
}

/// Return the process-wide connection, opening it on first use.
///
/// Only the first successful call's `url` is used. A failed open is not
/// remembered, so calling again retries.
pub async fn open_store(url: &str) -> Result<DbConnection, StorageError> {
    SHARED
        .get_or_try_init(|| DbConnection::new(url))
        .await
        .cloned()
}
