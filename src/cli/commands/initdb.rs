use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{error, info};

/// Connects to the database and applies all pending migrations.
pub async fn init_database(database_url: &str) -> Result<()> {
    info!("initializing database");

    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => connection,
        Err(e) => {
            error!("failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    match Migrator::up(&db, None).await {
        Ok(_) => info!("database migrations completed successfully"),
        Err(e) => {
            error!("failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
