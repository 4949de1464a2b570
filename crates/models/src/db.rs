use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Lifetime for the single in-memory SQLite connection. Recycling it would
/// replace the database with a fresh, unmigrated one.
const MEMORY_DB_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Open a pooled connection using the tuning knobs from `[database]`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg)).await?;
    info!(backend = ?db.get_database_backend(), max_connections = cfg.max_connections, "database connected");
    Ok(db)
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(cfg.url.clone());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    if is_sqlite_memory(&cfg.url) {
        pin_memory_connection(&mut opt);
    }
    opt
}

/// Each in-memory SQLite connection is a separate database, so the pool
/// holds exactly one and never retires it.
fn pin_memory_connection(opt: &mut ConnectOptions) {
    opt.max_connections(1)
        .min_connections(1)
        .max_lifetime(MEMORY_DB_LIFETIME)
        .idle_timeout(MEMORY_DB_LIFETIME);
}

/// Single-connection in-memory SQLite database, empty until migrated.
pub async fn connect_sqlite_memory() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    pin_memory_connection(&mut opt);
    opt.sqlx_logging(false);
    Database::connect(opt).await
}

pub async fn test_connection(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.ping().await
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}
