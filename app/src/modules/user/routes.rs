use super::dto::{SaveUserDto, UserDto};
use super::repository;
use crate::config::app_config;
use crate::modules::common::error::ApiError;
use crate::modules::common::extractors::{DbConnection, ValidatedMultipart};
use crate::modules::common::multipart_form_data;
use crate::modules::common::responses::{
    bad_request, not_found, Envelope, ErrorEnvelope, IdEnvelope, OptionalUserEnvelope,
    UserEnvelope, UserListEnvelope,
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
        .route("/", get(list_users).post(create_user))
        .route(
            "/:user_id",
            get(show_user).put(update_user).delete(delete_user),
        )
}

/// Lists every user, oldest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    responses(
        (status = OK, description = "every registered user", body = UserListEnvelope),
        (status = NOT_FOUND, description = "listing failure", body = ErrorEnvelope),
    ),
)]
pub async fn list_users(
    DbConnection(db): DbConnection,
) -> Result<Envelope<Vec<UserDto>>, ErrorEnvelope> {
    let users = repository::list_users(&db)
        .await
        .map_err(not_found)?
        .into_iter()
        .map(UserDto::from)
        .collect();

    Ok(Envelope::ok(StatusCode::OK, users))
}

/// Creates a user from a multipart/form-data body
#[utoipa::path(
    post,
    path = "/users",
    tag = "user",
    request_body(content = SaveUserDto, content_type = "multipart/form-data"),
    responses(
        (status = CREATED, description = "the created user", body = UserEnvelope),
        (status = BAD_REQUEST, description = "invalid payload", body = ErrorEnvelope),
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedMultipart(dto): ValidatedMultipart<SaveUserDto>,
) -> Result<Envelope<UserDto>, ErrorEnvelope> {
    let db = &state.db;

    let user = repository::create_user(db, &dto, &app_config().fallback_locale)
        .await
        .map_err(bad_request)?;

    if let Some(image) = &dto.image {
        let attach = attach_user_image(db, &state.storage, user.id, image).await;

        if let Err(e) = attach {
            let _ = repository::delete_user_row(db, user.id).await;
            return Err(bad_request(e));
        }
    }

    let user = repository::user_by_id(db, user.id)
        .await
        .map_err(bad_request)?
        .ok_or(bad_request(ApiError::NotFound(String::from(
            "user not found",
        ))))?;

    Ok(Envelope::ok(StatusCode::CREATED, UserDto::from(user)))
}

/// Shows a single user
///
/// A unknown id is not a error, the result is simply `null`.
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "user",
    params(("user_id" = i32, Path, description = "id of the user")),
    responses(
        (status = OK, description = "the requested user or null", body = OptionalUserEnvelope),
        (status = NOT_FOUND, description = "lookup failure", body = ErrorEnvelope),
    ),
)]
pub async fn show_user(
    DbConnection(db): DbConnection,
    Path(user_id): Path<i32>,
) -> Result<Envelope<Option<UserDto>>, ErrorEnvelope> {
    let user = repository::user_by_id(&db, user_id)
        .await
        .map_err(not_found)?;

    Ok(Envelope::ok(StatusCode::OK, user.map(UserDto::from)))
}

/// Updates a user from a multipart/form-data body
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "user",
    params(("user_id" = i32, Path, description = "id of the user to update")),
    request_body(content = SaveUserDto, content_type = "multipart/form-data"),
    responses(
        (status = ACCEPTED, description = "the updated user", body = UserEnvelope),
        (status = BAD_REQUEST, description = "invalid payload or unknown user", body = ErrorEnvelope),
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    ValidatedMultipart(dto): ValidatedMultipart<SaveUserDto>,
) -> Result<Envelope<UserDto>, ErrorEnvelope> {
    let db = &state.db;

    let existing = repository::user_by_id(db, user_id)
        .await
        .map_err(bad_request)?
        .ok_or_else(|| {
            bad_request(ApiError::Validation(format!(
                "user doesn't exist -> id: {}",
                user_id
            )))
        })?;

    let old_image = existing.image.clone();

    let user = repository::update_user(db, existing, &dto, &app_config().fallback_locale)
        .await
        .map_err(bad_request)?;

    if let Some(image) = &dto.image {
        attach_user_image(db, &state.storage, user.id, image)
            .await
            .map_err(bad_request)?;

        if let Some(old_image) = old_image {
            let _ = state.storage.delete(old_image).await;
        }
    }

    let user = repository::user_by_id(db, user.id)
        .await
        .map_err(bad_request)?
        .ok_or(bad_request(ApiError::NotFound(String::from(
            "user not found",
        ))))?;

    Ok(Envelope::ok(StatusCode::ACCEPTED, UserDto::from(user)))
}

/// Deletes a user and its stored profile image
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "user",
    params(("user_id" = i32, Path, description = "id of the user to delete")),
    responses(
        (status = 203, description = "id of the deleted user", body = IdEnvelope),
        (status = BAD_REQUEST, description = "unknown user", body = ErrorEnvelope),
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Envelope<i32>, ErrorEnvelope> {
    let db = &state.db;

    let user = repository::user_by_id(db, user_id)
        .await
        .map_err(bad_request)?
        .ok_or_else(|| {
            bad_request(ApiError::Validation(format!(
                "user doesn't exist -> id: {}",
                user_id
            )))
        })?;

    if let Some(image) = user.image {
        let _ = state.storage.delete(image).await;
    }

    repository::delete_user_row(db, user_id)
        .await
        .map_err(bad_request)?;

    Ok(Envelope::ok(
        StatusCode::NON_AUTHORITATIVE_INFORMATION,
        user_id,
    ))
}

/// uploads the profile image and binds the resulting key to the user row,
/// failing cleans up whatever half got through
async fn attach_user_image(
    db: &DatabaseConnection,
    storage: &Storage,
    user_id: i32,
    image: &FieldData<Bytes>,
) -> Result<(), ApiError> {
    let filename = multipart_form_data::unique_image_filename(image)?;

    let key = String::from(StorageKey {
        folder: format!("user/{}", user_id),
        filename,
    });

    storage
        .upload(key.clone(), image.contents.clone())
        .await
        .map_err(|_| ApiError::Persistence(String::from("failed to store the profile image")))?;

    if let Err(e) = repository::set_user_image(db, user_id, Some(key.clone())).await {
        let _ = storage.delete(key).await;
        return Err(e);
    }

    Ok(())
}
