//! Database migrations.

use docshelf_core::config::DatabaseProvider;
use docshelf_core::error::AppError;
use docshelf_database::DatabasePool;

use crate::output;

/// Apply all pending migrations to the configured database.
pub async fn execute(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    if config.database.provider == DatabaseProvider::Memory {
        return Err(AppError::validation(
            "The in-memory database has no migrations",
        ));
    }

    let db = DatabasePool::connect(&config.database).await?;
    println!("Running database migrations...");
    docshelf_database::migration::run_migrations(db.pool()).await?;
    db.close().await;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
