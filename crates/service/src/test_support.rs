#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_sqlite_memory;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the full schema applied. Each call is isolated.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_sqlite_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
