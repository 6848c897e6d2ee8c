use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::report_internal;

pub type Result<T> = std::result::Result<T, Error>;

/// The two failure kinds a caller can observe, plus storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    NotFound,
    IllegalOperation,
    Internal,
}

/// Centralized Error for controller, usually calling with `?`
/// and transformed into a response at the endpoint
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} with id {1} does not exist")]
    NotInDB(&'static str, i32),
    #[error("{0}")]
    NotAssociated(String),
    #[error("{0}")]
    IllegalOperation(String),
    #[error("seaorm error: `{0}`")]
    DBErr(#[from] sea_orm::DbErr),
}

impl Error {
    pub fn kind(&self) -> Kind {
        match self {
            Error::NotInDB(..) | Error::NotAssociated(_) => Kind::NotFound,
            Error::IllegalOperation(_) => Kind::IllegalOperation,
            Error::DBErr(_) => Kind::Internal,
        }
    }
    pub fn illegal(msg: impl Into<String>) -> Self {
        Error::IllegalOperation(msg.into())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

fn body(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            status: status.as_u16(),
        }),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.kind() {
            Kind::NotFound => {
                tracing::trace!(reason = %self, "database_notfound");
                body(StatusCode::NOT_FOUND, self.to_string())
            }
            Kind::IllegalOperation => {
                tracing::debug!(reason = %self, "illegal_operation");
                body(StatusCode::CONFLICT, self.to_string())
            }
            Kind::Internal => report_internal!(error, "{}", self),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kind() {
        assert_eq!(Error::NotInDB("topic", 1).kind(), Kind::NotFound);
        assert_eq!(
            Error::NotAssociated("not linked".to_owned()).kind(),
            Kind::NotFound
        );
        assert_eq!(Error::illegal("nope").kind(), Kind::IllegalOperation);
        assert_eq!(
            Error::DBErr(sea_orm::DbErr::Custom("boom".to_owned())).kind(),
            Kind::Internal
        );
    }
    #[test]
    fn message_names_entity() {
        assert_eq!(
            Error::NotInDB("professor", 7).to_string(),
            "professor with id 7 does not exist"
        );
    }
    #[test]
    fn status() {
        assert_eq!(
            Error::NotInDB("calendar", 3).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::illegal("already associated").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::DBErr(sea_orm::DbErr::Custom("boom".to_owned()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
