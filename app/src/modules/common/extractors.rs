use crate::{
    modules::common::{
        error::ApiError,
        responses::{bad_request, ErrorEnvelope},
    },
    server::controller::AppState,
};
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
};
use axum_typed_multipart::{BaseMultipart, TypedMultipartError};
use http::{request::Parts, Request};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use validator::Validate;

/// Wrapper struct that extracts the request body from `axum_typed_multipart::TryFromMultipart`
/// but also requires T to impl `Validate`, if extraction or validation fails a
/// bad request error envelope is returned
#[derive(Clone, Copy)]
pub struct ValidatedMultipart<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ValidatedMultipart<T>
where
    BaseMultipart<T, TypedMultipartError>: FromRequest<S, B, Rejection = TypedMultipartError>,
    T: Validate,
    B: Send + 'static,
    S: Send + Sync,
{
    type Rejection = ErrorEnvelope;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        match BaseMultipart::<T, TypedMultipartError>::from_request(req, state).await {
            Ok(payload) => match payload.data.validate() {
                Ok(_) => Ok(ValidatedMultipart(payload.data)),
                Err(e) => Err(bad_request(ApiError::Validation(e.to_string()))),
            },
            Err(rejection) => Err(bad_request(ApiError::Validation(rejection.to_string()))),
        }
    }
}

/// Helper to get a DB connection from the state
pub struct DbConnection(pub Arc<DatabaseConnection>);

#[async_trait]
impl FromRequestParts<AppState> for DbConnection {
    type Rejection = ErrorEnvelope;

    async fn from_request_parts(_: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(DbConnection(state.db.clone()))
    }
}
