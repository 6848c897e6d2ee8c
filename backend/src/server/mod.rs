pub mod db;
pub mod error;
pub mod logger;

pub use error::InitError;
pub type Result<T> = std::result::Result<T, InitError>;

use std::{ops::Deref, sync::Arc};

use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{config::GlobalConfig, controller::*, endpoint};

/// Holds every controller, all of them share one connection pool
pub struct Server {
    pub account: account::AccountController,
    pub topic: topic::TopicController,
    pub calendar: calendar::CalendarController,
    pub advisory: advisory::AdvisoryController,
    pub reservation: reservation::ReservationController,
    pub comment: comment::CommentController,
    pub completed: completed::CompletedController,
    pub db: Arc<DatabaseConnection>,
    address: String,
}

#[derive(Clone)]
pub struct ArcServer(Arc<Server>);

impl Deref for ArcServer {
    type Target = Server;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Arc<Server>> for ArcServer {
    fn from(value: Arc<Server>) -> Self {
        ArcServer(value)
    }
}

impl Server {
    /// Create a new server
    ///
    /// It will initialize project's stateful components in following order:
    /// 1. Crypto Controller
    /// 2. Database(and migration)
    /// 3. Other Controller
    pub async fn new(config: GlobalConfig) -> Result<Arc<Self>> {
        let crypto = crypto::CryptoController::new(&config.database.salt);
        let db = Arc::new(db::init(&config.database).await?);

        Ok(Arc::new(Self::with_db(db, crypto, config.address)))
    }
    /// construct controllers on top of an established connection
    pub fn with_db(
        db: Arc<DatabaseConnection>,
        crypto: crypto::CryptoController,
        address: String,
    ) -> Self {
        Server {
            account: account::AccountController::new(db.clone(), crypto),
            topic: topic::TopicController::new(db.clone()),
            calendar: calendar::CalendarController::new(db.clone()),
            advisory: advisory::AdvisoryController::new(db.clone()),
            reservation: reservation::ReservationController::new(db.clone()),
            comment: comment::CommentController::new(db.clone()),
            completed: completed::CompletedController::new(db.clone()),
            db,
            address,
        }
    }
    /// Start the server, return after ctrl-c
    pub async fn start(self: Arc<Self>) {
        let address = self.address.clone();
        let app = endpoint::router(ArcServer(self))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let listener = match tokio::net::TcpListener::bind(&address).await {
            Ok(x) => x,
            Err(err) => {
                tracing::error!("{}", InitError::Bind(address, err));
                return;
            }
        };
        tracing::info!(address, "server_started");

        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("graceful_shutdown");
            }
        });
        if let Err(err) = serve.await {
            tracing::error!(%err, "server_stopped");
        }
    }
}
