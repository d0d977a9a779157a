use crate::modules::common::{error::ApiError, validators::REGEX_IS_PHONE_NUMBER};
use crate::modules::user::dto::UserDto;
use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use validator::Validate;

// --- INPUT

/// DTO to create or update filling stations, extracted from `multipart/form-data`
/// requests, the JSON encoded fields are decoded and validated by the accessor
/// methods before any row is touched
#[derive(TryFromMultipart, ToSchema, Validate)]
pub struct SaveStationDto {
    #[schema(value_type = String, format = Binary)]
    pub image: Option<FieldData<Bytes>>,

    /// id of the owning user
    pub user_id: i32,

    /// JSON encoded array of fuel type ids, eg: `[1, 2, 3]`
    pub fuel_types_ids: String,

    #[validate(regex(
        path = "REGEX_IS_PHONE_NUMBER",
        message = "phone number must contain only digits"
    ))]
    pub phone_number: Option<String>,

    /// id of a existing map object, mutually exclusive with `map_object`
    pub map_object_id: Option<i32>,

    /// JSON encoded map object to create or update, eg:
    ///
    /// `{"lat": 50.23, "lng": 40.0, "translations": {"am": {"title": "t", "address": "a"}}}`
    pub map_object: Option<String>,

    /// JSON encoded display names by locale, eg: `{"am": {"cps_name": "name1"}}`
    pub translations: Option<String>,
}

impl SaveStationDto {
    /// decodes the fuel type id list, failing on malformed or empty lists
    pub fn fuel_type_ids(&self) -> Result<Vec<i32>, ApiError> {
        let ids = decode_fuel_types_ids(&self.fuel_types_ids)?;

        if ids.is_empty() {
            return Err(ApiError::Validation(String::from("fuel ids error")));
        }

        Ok(ids)
    }

    /// decodes the inline map object payload if one was informed
    pub fn map_object(&self) -> Result<Option<MapObjectPayload>, ApiError> {
        match &self.map_object {
            Some(raw) => serde_json::from_str(raw).map(Some).map_err(|_| {
                ApiError::Validation(String::from("map_object must be a valid JSON object"))
            }),
            None => Ok(None),
        }
    }

    /// decodes the display name translations, absent means no translations
    pub fn translations(&self) -> Result<HashMap<String, StationTranslationPayload>, ApiError> {
        match &self.translations {
            Some(raw) => serde_json::from_str(raw).map_err(|_| {
                ApiError::Validation(String::from(
                    "translations must be a JSON object keyed by locale",
                ))
            }),
            None => Ok(HashMap::new()),
        }
    }
}

/// decodes a JSON encoded fuel type id list, also used to decode the
/// encoded list stored on the station row
pub fn decode_fuel_types_ids(raw: &str) -> Result<Vec<i32>, ApiError> {
    serde_json::from_str(raw).map_err(|_| {
        ApiError::Validation(String::from("fuel_types_ids must be a JSON array of integers"))
    })
}

/// Inline map object payload, when `id` is informed and exists the map
/// object is updated, otherwise a new one is created
#[derive(Deserialize, ToSchema)]
pub struct MapObjectPayload {
    pub id: Option<i32>,
    pub lat: f64,
    pub lng: f64,

    /// title and address by locale
    #[serde(default)]
    pub translations: HashMap<String, MapObjectTranslationPayload>,
}

#[derive(Deserialize, ToSchema)]
pub struct MapObjectTranslationPayload {
    pub title: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct StationTranslationPayload {
    pub cps_name: String,
}

// --- OUTPUT

#[derive(Serialize, ToSchema)]
pub struct MapObjectDto {
    pub id: i32,
    pub lat: f64,
    pub lng: f64,

    /// title and address by locale
    pub translations: HashMap<String, MapObjectTranslationDto>,
}

#[derive(Serialize, ToSchema)]
pub struct MapObjectTranslationDto {
    pub title: Option<String>,
    pub address: Option<String>,
}

impl From<(entity::map_object::Model, Vec<entity::map_object_translation::Model>)> for MapObjectDto {
    fn from(
        (m, translations): (
            entity::map_object::Model,
            Vec<entity::map_object_translation::Model>,
        ),
    ) -> Self {
        Self {
            id: m.id,
            lat: m.lat,
            lng: m.lng,
            translations: translations
                .into_iter()
                .map(|t| {
                    (
                        t.locale,
                        MapObjectTranslationDto {
                            title: t.title,
                            address: t.address,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// A filling station decorated with its resolved fuel types, map object
/// and a snapshot of the owning user
#[derive(Serialize, ToSchema)]
pub struct StationDto {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
    pub fuel_types_ids: Vec<i32>,
    pub phone_number: Option<String>,
    pub map_object_id: i32,
    pub status: bool,
    pub image: Option<String>,

    /// display name by locale
    pub translations: HashMap<String, String>,

    pub map_object: Option<MapObjectDto>,
    pub fuel_types: Vec<entity::fuel_type::Model>,
    pub user: Option<UserDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(fuel_types_ids: &str) -> SaveStationDto {
        SaveStationDto {
            image: None,
            user_id: 1,
            fuel_types_ids: String::from(fuel_types_ids),
            phone_number: None,
            map_object_id: None,
            map_object: None,
            translations: None,
        }
    }

    #[test]
    fn fuel_type_ids_round_trip() {
        assert_eq!(dto("[1, 2, 3]").fuel_type_ids().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn empty_fuel_type_id_list_is_a_validation_error() {
        let error = dto("[]").fuel_type_ids().unwrap_err();
        assert_eq!(error, ApiError::Validation(String::from("fuel ids error")));
    }

    #[test]
    fn malformed_fuel_type_id_list_is_a_validation_error() {
        assert!(dto("not json").fuel_type_ids().is_err());
        assert!(dto(r#"{"id": 1}"#).fuel_type_ids().is_err());
    }

    #[test]
    fn absent_translations_decode_to_a_empty_map() {
        assert!(dto("[1]").translations().unwrap().is_empty());
    }

    #[test]
    fn translations_decode_by_locale() {
        let mut input = dto("[1]");
        input.translations = Some(String::from(
            r#"{"am": {"cps_name": "name1"}, "en": {"cps_name": "name2"}}"#,
        ));

        let translations = input.translations().unwrap();

        assert_eq!(translations.len(), 2);
        assert_eq!(translations["am"].cps_name, "name1");
        assert_eq!(translations["en"].cps_name, "name2");
    }

    #[test]
    fn map_object_payload_decodes_with_optional_id_and_translations() {
        let mut input = dto("[1]");
        input.map_object = Some(String::from(
            r#"{"lat": 50.23, "lng": 40.0, "translations": {"am": {"title": "title1", "address": "addr1"}}}"#,
        ));

        let payload = input.map_object().unwrap().unwrap();

        assert_eq!(payload.id, None);
        assert_eq!(payload.lat, 50.23);
        assert_eq!(payload.translations["am"].title.as_deref(), Some("title1"));
    }

    #[test]
    fn malformed_map_object_payload_is_a_validation_error() {
        let mut input = dto("[1]");
        input.map_object = Some(String::from("{not json"));

        assert!(input.map_object().is_err());
    }
}
