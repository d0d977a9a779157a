use super::open_api;
use crate::{
    modules::{station, user},
    services::storage::Storage,
};
use axum::{body::Body, routing::get, Router};
use http::{Request, StatusCode};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// The main application state, this is cloned for every HTTP
/// request and thus its fields should contain types that are cheap
/// to clone. The connection sits behind a `Arc` since not every
/// sea-orm feature set keeps `DatabaseConnection` itself clonable.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub storage: Storage,
}

/// Creates the main axum router/controller to be served over http
pub fn new(db: DatabaseConnection, storage: Storage) -> Router {
    let state = AppState {
        db: Arc::new(db),
        storage,
    };

    let tracing_layer = TraceLayer::new_for_http()
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!("request: {} {}", request.method(), request.uri().path())
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let global_middlewares = ServiceBuilder::new()
        .layer(tracing_layer)
        .layer(CorsLayer::permissive());

    Router::new()
        .merge(open_api::create_openapi_router())
        .route("/healthcheck", get(healthcheck))
        .nest("/stations", station::routes::create_router())
        .nest("/users", user::routes::create_router())
        .layer(global_middlewares)
        .with_state(state)
}

#[utoipa::path(
    get,
    tag = "meta",
    path = "/healthcheck",
    responses((status = OK)),
)]
pub async fn healthcheck() -> StatusCode {
    StatusCode::OK
}
