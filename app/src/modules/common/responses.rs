use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::ApiError;
use crate::modules::{station::dto::StationDto, user::dto::UserDto};

/// The uniform success wrapper returned by every endpoint
///
/// `status_code` mirrors the HTTP status of the response so clients that
/// only look at the body still see the outcome.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub status: bool,
    pub status_code: u16,
    pub result: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(code: StatusCode, result: T) -> Envelope<T> {
        Envelope {
            status: true,
            status_code: code.as_u16(),
            result,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let code = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        (code, Json(self)).into_response()
    }
}

/// The uniform error wrapper, same shape as `Envelope` with the result
/// replaced by the error message
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn from_error(code: StatusCode, error: ApiError) -> ErrorEnvelope {
        ErrorEnvelope {
            status: false,
            status_code: code.as_u16(),
            error: error.to_string(),
        }
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let code = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST);
        (code, Json(self)).into_response()
    }
}

/// wraps a domain failure into a 400 error envelope
pub fn bad_request(error: ApiError) -> ErrorEnvelope {
    ErrorEnvelope::from_error(StatusCode::BAD_REQUEST, error)
}

/// wraps a domain failure into a 404 error envelope
pub fn not_found(error: ApiError) -> ErrorEnvelope {
    ErrorEnvelope::from_error(StatusCode::NOT_FOUND, error)
}

// Concrete wire shapes of `Envelope<T>` per result payload, these exist
// only to be referenced by the openapi docs, never constructed.

#[derive(ToSchema)]
#[schema(title = "IdEnvelope")]
pub struct IdEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub result: i32,
}

#[derive(ToSchema)]
#[schema(title = "UserEnvelope")]
pub struct UserEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub result: UserDto,
}

#[derive(ToSchema)]
#[schema(title = "OptionalUserEnvelope")]
pub struct OptionalUserEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub result: Option<UserDto>,
}

#[derive(ToSchema)]
#[schema(title = "UserListEnvelope")]
pub struct UserListEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub result: Vec<UserDto>,
}

#[derive(ToSchema)]
#[schema(title = "StationEnvelope")]
pub struct StationEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub result: StationDto,
}

#[derive(ToSchema)]
#[schema(title = "StationListEnvelope")]
pub struct StationListEnvelope {
    pub status: bool,
    pub status_code: u16,
    pub result: Vec<StationDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_mirrors_the_status_code() {
        let envelope = Envelope::ok(StatusCode::CREATED, 10);
        let value = serde_json::to_value(envelope).unwrap();

        assert_eq!(
            value,
            json!({"status": true, "status_code": 201, "result": 10})
        );
    }

    #[test]
    fn envelopes_wrap_scalar_list_and_optional_payloads_uniformly() {
        let scalar = serde_json::to_value(Envelope::ok(StatusCode::NON_AUTHORITATIVE_INFORMATION, 42)).unwrap();
        assert_eq!(
            scalar,
            json!({"status": true, "status_code": 203, "result": 42})
        );

        let list = serde_json::to_value(Envelope::ok(StatusCode::OK, vec![1, 2, 3])).unwrap();
        assert_eq!(
            list,
            json!({"status": true, "status_code": 200, "result": [1, 2, 3]})
        );

        let present = serde_json::to_value(Envelope::ok(StatusCode::OK, Some(1))).unwrap();
        assert_eq!(
            present,
            json!({"status": true, "status_code": 200, "result": 1})
        );
    }

    #[test]
    fn absent_result_serializes_as_null() {
        let envelope = Envelope::ok(StatusCode::OK, Option::<i32>::None);
        let value = serde_json::to_value(envelope).unwrap();

        assert_eq!(
            value,
            json!({"status": true, "status_code": 200, "result": null})
        );
    }

    #[test]
    fn error_envelope_carries_the_failure_message() {
        let envelope = bad_request(ApiError::Validation(String::from("fuel ids error")));
        let value = serde_json::to_value(envelope).unwrap();

        assert_eq!(
            value,
            json!({"status": false, "status_code": 400, "error": "fuel ids error"})
        );
    }

    #[test]
    fn not_found_envelope_uses_code_404() {
        let envelope = not_found(ApiError::NotFound(String::from("station not found")));

        assert_eq!(envelope.status_code, 404);
        assert!(!envelope.status);
    }
}
