use super::dto::{SaveStationDto, StationDto};
use super::repository;
use crate::modules::common::error::ApiError;
use crate::modules::common::extractors::{DbConnection, ValidatedMultipart};
use crate::modules::common::multipart_form_data;
use crate::modules::common::responses::{
    bad_request, not_found, Envelope, ErrorEnvelope, IdEnvelope, StationEnvelope,
    StationListEnvelope,
};
use crate::server::controller::AppState;
use crate::services::storage::{Storage, StorageKey};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use axum_typed_multipart::FieldData;
use http::StatusCode;
use sea_orm::DatabaseConnection;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations).post(create_station))
        .route(
            "/:station_id",
            get(show_station).put(update_station).delete(delete_station),
        )
}

/// Lists every filling station, oldest first
#[utoipa::path(
    get,
    path = "/stations",
    tag = "station",
    responses(
        (status = OK, description = "every registered filling station", body = StationListEnvelope),
        (status = NOT_FOUND, description = "listing failure", body = ErrorEnvelope),
    ),
)]
pub async fn list_stations(
    DbConnection(db): DbConnection,
) -> Result<Envelope<Vec<StationDto>>, ErrorEnvelope> {
    let stations = repository::list_stations(&db).await.map_err(not_found)?;

    Ok(Envelope::ok(StatusCode::OK, stations))
}

/// Creates a filling station from a multipart/form-data body
#[utoipa::path(
    post,
    path = "/stations",
    tag = "station",
    request_body(content = SaveStationDto, content_type = "multipart/form-data"),
    responses(
        (status = CREATED, description = "the created station", body = StationEnvelope),
        (status = BAD_REQUEST, description = "invalid payload", body = ErrorEnvelope),
    ),
)]
pub async fn create_station(
    State(state): State<AppState>,
    ValidatedMultipart(dto): ValidatedMultipart<SaveStationDto>,
) -> Result<Envelope<StationDto>, ErrorEnvelope> {
    let db = &state.db;

    let station = repository::save_station(db, &dto, None)
        .await
        .map_err(bad_request)?;

    if let Some(image) = &dto.image {
        let attach = attach_station_image(db, &state.storage, station.id, image).await;

        // a station row without its uploaded image is worse than no row at
        // all, so undo the creation if the image cannot be bound to it
        if let Err(e) = attach {
            let _ = repository::delete_station_row(db, station.id).await;
            return Err(bad_request(e));
        }
    }

    let station = refetch_station(db, station.id).await.map_err(bad_request)?;

    Ok(Envelope::ok(StatusCode::CREATED, station))
}

/// Shows a single filling station with its map object, fuel types and owner
#[utoipa::path(
    get,
    path = "/stations/{station_id}",
    tag = "station",
    params(("station_id" = i32, Path, description = "id of the station")),
    responses(
        (status = OK, description = "the requested station", body = StationEnvelope),
        (status = NOT_FOUND, description = "station not found", body = ErrorEnvelope),
    ),
)]
pub async fn show_station(
    DbConnection(db): DbConnection,
    Path(station_id): Path<i32>,
) -> Result<Envelope<StationDto>, ErrorEnvelope> {
    let station = refetch_station(&db, station_id).await.map_err(not_found)?;

    Ok(Envelope::ok(StatusCode::OK, station))
}

/// Overwrites a filling station from a multipart/form-data body
#[utoipa::path(
    put,
    path = "/stations/{station_id}",
    tag = "station",
    params(("station_id" = i32, Path, description = "id of the station to update")),
    request_body(content = SaveStationDto, content_type = "multipart/form-data"),
    responses(
        (status = ACCEPTED, description = "the updated station", body = StationEnvelope),
        (status = BAD_REQUEST, description = "invalid payload or unknown station", body = ErrorEnvelope),
    ),
)]
pub async fn update_station(
    State(state): State<AppState>,
    Path(station_id): Path<i32>,
    ValidatedMultipart(dto): ValidatedMultipart<SaveStationDto>,
) -> Result<Envelope<StationDto>, ErrorEnvelope> {
    let db = &state.db;

    let existing = repository::station_by_id(db, station_id)
        .await
        .map_err(bad_request)?
        .ok_or_else(|| {
            bad_request(ApiError::Validation(format!(
                "filling station doesn't exist -> id: {}",
                station_id
            )))
        })?;

    let old_image = existing.image.clone();

    let station = repository::save_station(db, &dto, Some(existing))
        .await
        .map_err(bad_request)?;

    if let Some(image) = &dto.image {
        attach_station_image(db, &state.storage, station.id, image)
            .await
            .map_err(bad_request)?;

        // the replaced file is orphaned, removing it is best effort
        if let Some(old_image) = old_image {
            let _ = state.storage.delete(old_image).await;
        }
    }

    let station = refetch_station(db, station.id).await.map_err(bad_request)?;

    Ok(Envelope::ok(StatusCode::ACCEPTED, station))
}

/// Deletes a filling station row
///
/// Always answers 203 with the requested id, even when no such station
/// exists. The map object and any stored image are left untouched.
#[utoipa::path(
    delete,
    path = "/stations/{station_id}",
    tag = "station",
    params(("station_id" = i32, Path, description = "id of the station to delete")),
    responses(
        (status = 203, description = "id of the deleted station", body = IdEnvelope),
    ),
)]
pub async fn delete_station(
    State(state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Envelope<i32> {
    let _ = repository::delete_station_row(&state.db, station_id).await;

    Envelope::ok(StatusCode::NON_AUTHORITATIVE_INFORMATION, station_id)
}

/// uploads the station image and binds the resulting key to the row,
/// failing cleans up whatever half got through
async fn attach_station_image(
    db: &DatabaseConnection,
    storage: &Storage,
    station_id: i32,
    image: &FieldData<Bytes>,
) -> Result<(), ApiError> {
    let filename = multipart_form_data::unique_image_filename(image)?;

    let key = String::from(StorageKey {
        folder: format!("station/{}", station_id),
        filename,
    });

    storage
        .upload(key.clone(), image.contents.clone())
        .await
        .map_err(|_| ApiError::Persistence(String::from("failed to store the station image")))?;

    if let Err(e) = repository::set_station_image(db, station_id, Some(key.clone())).await {
        let _ = storage.delete(key).await;
        return Err(e);
    }

    Ok(())
}

async fn refetch_station(
    db: &DatabaseConnection,
    station_id: i32,
) -> Result<StationDto, ApiError> {
    let (station, map_object) = repository::station_with_map_object(db, station_id)
        .await?
        .ok_or(ApiError::NotFound(String::from(
            "filling station not found",
        )))?;

    repository::decorate_station(db, station, map_object).await
}
