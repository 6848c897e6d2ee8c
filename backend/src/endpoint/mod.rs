//! REST surface, each route maps onto one controller operation
//!
//! Handlers hold no logic beyond extracting path and body, errors turn into
//! responses through [`crate::util::error::Error`]'s `IntoResponse`
mod account;
mod advisory;
mod calendar;
mod comment;
mod completed;
mod reservation;
mod topic;

use axum::Router;

use crate::server::ArcServer;

mod tools {
    pub use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{delete, get, post, put},
        Json, Router,
    };
    pub use serde::Deserialize;

    pub use crate::server::ArcServer;
    pub use crate::util::error::Result;
}

pub fn router(server: ArcServer) -> Router {
    Router::new()
        .merge(account::routes())
        .merge(topic::routes())
        .merge(calendar::routes())
        .merge(advisory::routes())
        .merge(reservation::routes())
        .merge(comment::routes())
        .merge(completed::routes())
        .with_state(server)
}
