//! Database access layer
//!
//! Pool construction, embedded migrations, and the post repository.

pub mod post_repo;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Create the PostgreSQL connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        max_connections = config.max_connections,
        "Creating database pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        // Timeout for acquiring a connection from the pool
        .acquire_timeout(Duration::from_secs(10))
        // Close connections idle for longer than this
        .idle_timeout(Duration::from_secs(600))
        // Maximum lifetime of a connection (to handle stale connections)
        .max_lifetime(Duration::from_secs(1800))
        // Test connections before returning them from the pool
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    info!("Database pool created");
    Ok(pool)
}

/// Run embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    debug!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
