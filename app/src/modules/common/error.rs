use sea_orm::DbErr;
use std::fmt;

/// Domain failures surfaced by repository and handler logic.
///
/// every variant carries the message that ends up on the response envelope,
/// the status code is picked at the route boundary since the same failure
/// kind maps to different codes depending on the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// missing or invalid referenced id / malformed payload
    Validation(String),

    /// entity absent on a explicit existence check
    NotFound(String),

    /// backing store write failure
    Persistence(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Persistence(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl From<DbErr> for ApiError {
    /// sea-orm errors might contain sensitive details such as connection
    /// strings, log the original and surface a generic persistence failure
    fn from(err: DbErr) -> Self {
        tracing::error!("[DB] query failed: {err}");
        ApiError::Persistence(String::from("persistence failure"))
    }
}
