//! PostgreSQL pool behind the group and document repositories.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use docshelf_core::config::{DatabaseConfig, DatabaseProvider};
use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;

/// Reported to the server as `application_name`, visible in `pg_stat_activity`.
pub const APPLICATION_NAME: &str = "docshelf";

/// Pool limits resolved from the `[database]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    /// `None` keeps idle connections open indefinitely.
    pub idle_timeout: Option<Duration>,
}

impl PoolSettings {
    /// Checks the section describes a usable Postgres pool.
    pub fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        if config.provider != DatabaseProvider::Postgres {
            return Err(AppError::configuration(
                "database.provider is not 'postgres'; there is no pool to open",
            ));
        }
        if config.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be at least 1",
            ));
        }
        if config.min_connections > config.max_connections {
            return Err(AppError::configuration(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                config.min_connections, config.max_connections
            )));
        }

        Ok(Self {
            max_connections: config.max_connections,
            min_connections: config.min_connections,
            acquire_timeout: Duration::from_secs(config.connect_timeout_seconds.max(1)),
            idle_timeout: (config.idle_timeout_seconds > 0)
                .then(|| Duration::from_secs(config.idle_timeout_seconds)),
        })
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
    }
}

/// Parses the connection URL. The password never leaves this value.
fn connect_options(url: &str) -> AppResult<PgConnectOptions> {
    PgConnectOptions::from_str(url)
        .map(|options| options.application_name(APPLICATION_NAME))
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid database.url", e)
        })
}

/// Shared sqlx pool for the Postgres table stores.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Opens the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let settings = PoolSettings::from_config(config)?;
        let options = connect_options(&config.url)?;
        let server = format!(
            "{}:{}/{}",
            options.get_host(),
            options.get_port(),
            options.get_database().unwrap_or_default()
        );

        info!(
            server = %server,
            user = options.get_username(),
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = settings
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database at {server}"),
                    e,
                )
            })?;

        info!(server = %server, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for in-flight queries, then closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
