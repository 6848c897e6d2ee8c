//! In-memory database and fixtures shared by controller tests

use std::sync::Arc;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{controller::crypto::CryptoController, server::Server};

/// fresh in-memory database with every migration applied
///
/// the pool is limited to one connection, each connection of
/// `sqlite::memory:` would otherwise see its own empty database
pub async fn connect() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn server() -> Server {
    Server::with_db(
        Arc::new(connect().await),
        CryptoController::new("test"),
        "127.0.0.1:0".to_owned(),
    )
}
