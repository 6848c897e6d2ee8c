use std::path::Path;

use migration::MigratorTrait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use tracing::{debug_span, instrument, Instrument};

use super::InitError;
use crate::config;

#[instrument(skip_all, name = "construct_db")]
/// initialize the database and connection
///
/// 1. Connect to database(the file is created if missing).
/// 2. Tune sqlite with pragma.
/// 3. Run migration if `database.migrate` is set.
pub async fn init(config: &config::Database) -> super::Result<DatabaseConnection> {
    if let Some(parent) = Path::new(&config.path).parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(InitError::DatabaseDir)?;
    }
    let uri = format!("sqlite://{}?mode=rwc", config.path);

    let mut opt = ConnectOptions::new(uri);
    opt.sqlx_logging_level(log::LevelFilter::Trace);

    let db = Database::connect(opt).await.map_err(InitError::InitConn)?;

    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA journal_mode = WAL;PRAGMA synchronous = NORMAL;PRAGMA cache_size = -65536;", // 64MiB cache
    ))
    .instrument(debug_span!("db_optimize"))
    .await
    .map_err(InitError::OptimizeDB)?;

    if config.migrate {
        migrate(&db).await?;
    }

    Ok(db)
}

#[instrument(skip_all, name = "migrate")]
/// Run every pending migration
async fn migrate(db: &DatabaseConnection) -> super::Result<()> {
    migration::Migrator::up(db, None)
        .await
        .map_err(InitError::AutoMigrate)?;
    tracing::info!("migration_finished");
    Ok(())
}
