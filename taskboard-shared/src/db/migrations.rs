/// Database migration runner
///
/// Migrations live in this crate's `migrations/` directory and are embedded
/// at compile time via `sqlx::migrate!`. They run once at bootstrap, before
/// the server starts accepting traffic.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply; bootstrap treats this as
/// fatal.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("running database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("database migrations up to date");
            Ok(())
        }
        Err(e) => {
            warn!("migration failed: {}", e);
            Err(e)
        }
    }
}
