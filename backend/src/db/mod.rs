//! Database connection and repositories
//!
//! Every repository is read-only and returns `sqlx::Result`; callers decide how a
//! store failure is reported.

pub mod friends;
pub mod notifications;
pub mod reservations;
pub mod reviews;
pub mod schema_sync;
pub mod users;
pub mod venues;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use friends::FriendRepository;
pub use notifications::NotificationRepository;
pub use reservations::{ReservationInclude, ReservationRepository};
pub use reviews::ReviewRepository;
pub use schema_sync::SchemaSyncResult;
pub use users::UsersRepository;
pub use venues::VenueRepository;

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    fn connect_options(url: &str) -> Result<SqliteConnectOptions> {
        let url = if url.starts_with("sqlite:") {
            url.to_string()
        } else {
            format!("sqlite:{}", url)
        };
        Ok(SqliteConnectOptions::from_str(&url)
            .with_context(|| format!("Invalid database URL: {}", url))?
            .create_if_missing(true)
            .foreign_keys(true))
    }

    /// Create a new database connection pool.
    ///
    /// Accepts either a `sqlite:` URL or a bare file path. The file is created if missing,
    /// along with its parent directory.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = Self::connect_options(url)?;
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", url))?;

        Ok(Self { pool })
    }

    /// Create a new database connection pool with retry logic.
    /// Retries every `retry_interval` until successful.
    pub async fn connect_with_retry(
        url: &str,
        max_connections: u32,
        retry_interval: Duration,
    ) -> Self {
        loop {
            match Self::connect(url, max_connections).await {
                Ok(db) => return db,
                Err(e) => {
                    tracing::warn!(
                        error = %format!("{:#}", e),
                        retry_in_secs = retry_interval.as_secs(),
                        "Database connection failed, retrying"
                    );
                    tokio::time::sleep(retry_interval).await;
                }
            }
        }
    }

    /// Private in-memory database on a single connection.
    ///
    /// Each new connection to `sqlite::memory:` is a fresh empty database, so the pool must
    /// never open a second one or recycle the first.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create missing tables, columns and indexes for every entity.
    pub async fn sync_schema(&self) -> SchemaSyncResult {
        schema_sync::sync_all_entity_schemas(&self.pool).await
    }

    /// Round-trip a trivial query; used by the readiness probe.
    pub async fn ping(&self) -> sqlx::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get a users repository
    pub fn users(&self) -> UsersRepository {
        UsersRepository::new(self.clone())
    }

    /// Get a friends repository
    pub fn friends(&self) -> FriendRepository {
        FriendRepository::new(self.pool.clone())
    }

    /// Get a notifications repository
    pub fn notifications(&self) -> NotificationRepository {
        NotificationRepository::new(self.pool.clone())
    }

    /// Get a reservations repository
    pub fn reservations(&self) -> ReservationRepository {
        ReservationRepository::new(self.pool.clone())
    }

    /// Get a reviews repository
    pub fn reviews(&self) -> ReviewRepository {
        ReviewRepository::new(self.pool.clone())
    }

    /// Get a venues repository (pubs, locations, tables)
    pub fn venues(&self) -> VenueRepository {
        VenueRepository::new(self.pool.clone())
    }
}
