//! HTTP handlers: decode the request, call one store operation, translate
//! the outcome to a status code. No business rules live here.

pub mod auth;
pub mod conversations;
pub mod groups;
pub mod messages;

use axum::http::StatusCode;
use parlor_core::Error;
use tracing::error;

pub(crate) fn error_status(err: Error) -> StatusCode {
    match err {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Unauthorized => StatusCode::UNAUTHORIZED,
        Error::NotFound => StatusCode::NOT_FOUND,
        Error::Forbidden => StatusCode::FORBIDDEN,
        Error::Conflict(_) => StatusCode::CONFLICT,
        Error::Internal(msg) => {
            error!("internal store error: {msg}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
