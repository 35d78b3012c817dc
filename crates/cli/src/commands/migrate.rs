//! Database migration command.
//!
//! Runs the storefront SQL migrations plus the tower-sessions store
//! migration (the sessions table). The server never migrates on startup;
//! this command is the one place schema changes are applied.

use tower_sessions_sqlx_store::PostgresStore;
use tracing::info;

/// Run all migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    info!("Running session store migration...");
    PostgresStore::new(pool.clone()).migrate().await?;

    info!("Migrations complete!");
    Ok(())
}
