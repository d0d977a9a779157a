use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

/// multipart/form-data body shared by user creation and updates
///
/// every field is optional at the wire level, creation additionally
/// requires `email` and `password` to be informed.
#[derive(TryFromMultipart, ToSchema, Validate)]
pub struct SaveUserDto {
    /// profile image, files without a image extension are rejected
    #[schema(value_type = String, format = Binary)]
    pub image: Option<FieldData<Bytes>>,

    #[validate(email)]
    pub email: Option<String>,

    pub first_name: Option<String>,

    pub last_name: Option<String>,

    #[validate(length(min = 5, max = 256))]
    pub password: Option<String>,

    /// locale of the user, absent means the fallback locale
    pub language: Option<String>,
}

/// a user as exposed on API responses, the password hash is never serialized
#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language: String,
    pub status: bool,
    pub image: Option<String>,
}

impl From<entity::user::Model> for UserDto {
    fn from(m: entity::user::Model) -> Self {
        Self {
            id: m.id,
            created_at: m.created_at.into(),
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            language: m.language,
            status: m.status,
            image: m.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_password_hash_never_reaches_the_wire() {
        let user = UserDto::from(entity::user::Model {
            id: 1,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            email: String::from("user@host.com"),
            first_name: None,
            last_name: None,
            password: String::from("$2b$12$secret-hash"),
            language: String::from("am"),
            status: true,
            image: None,
        });

        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("secret-hash"));
        assert!(json.contains(r#""email":"user@host.com""#));
    }
}
