use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds surfaced by store operations. The transport adapter maps each
/// variant to a status code; the core never sees status codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("unknown token")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("not a participant")]
    Forbidden,

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("internal error: {0}")]
    Internal(String),
}
