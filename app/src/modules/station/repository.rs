use super::dto::{
    decode_fuel_types_ids, MapObjectDto, MapObjectPayload, MapObjectTranslationPayload,
    SaveStationDto, StationDto, StationTranslationPayload,
};
use crate::modules::common::error::ApiError;
use crate::modules::user::dto::UserDto;
use entity::{
    filling_station, filling_station_translation, fuel_type, language, map_object,
    map_object_translation, user,
};
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

pub async fn user_exists(db: &DatabaseConnection, user_id: i32) -> Result<bool, ApiError> {
    Ok(user::Entity::find_by_id(user_id).one(db).await?.is_some())
}

/// checks every fuel type id references a existing row, failing on the
/// first unknown id
pub async fn assert_fuel_types_exist(
    db: &DatabaseConnection,
    fuel_types_ids: &[i32],
) -> Result<(), ApiError> {
    for fuel_type_id in fuel_types_ids {
        let exists = fuel_type::Entity::find_by_id(*fuel_type_id)
            .one(db)
            .await?
            .is_some();

        if !exists {
            return Err(ApiError::Validation(format!(
                "fuel type doesn't exist -> id: {}",
                fuel_type_id
            )));
        }
    }

    Ok(())
}

pub async fn supported_languages(
    db: &DatabaseConnection,
) -> Result<Vec<language::Model>, ApiError> {
    Ok(language::Entity::find().all(db).await?)
}

/// checks every supplied locale is on the declared set of supported languages
pub fn assert_supported_locales<'a>(
    locales: impl Iterator<Item = &'a String>,
    languages: &[language::Model],
) -> Result<(), ApiError> {
    for locale in locales {
        if !languages.iter().any(|language| language.locale == *locale) {
            return Err(ApiError::Validation(format!(
                "locale isn't supported -> {}",
                locale
            )));
        }
    }

    Ok(())
}

/// resolves the map object a station points to
///
/// a informed `map_object_id` must reference a existing row, otherwise a
/// inline payload is created-or-updated and its id used, informing neither
/// is a validation error.
pub async fn resolve_map_object(
    db: &DatabaseConnection,
    dto: &SaveStationDto,
    languages: &[language::Model],
) -> Result<i32, ApiError> {
    if let Some(map_object_id) = dto.map_object_id {
        let exists = map_object::Entity::find_by_id(map_object_id)
            .one(db)
            .await?
            .is_some();

        if !exists {
            return Err(ApiError::Validation(format!(
                "map object doesn't exist -> id: {}",
                map_object_id
            )));
        }

        return Ok(map_object_id);
    }

    if let Some(payload) = dto.map_object()? {
        assert_supported_locales(payload.translations.keys(), languages)?;

        return set_map_object(db, &payload).await;
    }

    Err(ApiError::Validation(String::from(
        "map object or map object id must be informed",
    )))
}

/// creates or updates a map object from a inline payload, returning its id
pub async fn set_map_object(
    db: &DatabaseConnection,
    payload: &MapObjectPayload,
) -> Result<i32, ApiError> {
    let map_object_id = match payload.id {
        Some(id) => match map_object::Entity::find_by_id(id).one(db).await? {
            Some(existing) => {
                let mut existing: map_object::ActiveModel = existing.into();
                existing.lat = Set(payload.lat);
                existing.lng = Set(payload.lng);
                existing.update(db).await?;

                id
            }
            None => insert_map_object(db, payload).await?,
        },
        None => insert_map_object(db, payload).await?,
    };

    for (locale, translation) in &payload.translations {
        set_map_object_translation(db, map_object_id, locale, translation).await?;
    }

    Ok(map_object_id)
}

async fn insert_map_object(
    db: &DatabaseConnection,
    payload: &MapObjectPayload,
) -> Result<i32, ApiError> {
    let inserted = map_object::ActiveModel {
        lat: Set(payload.lat),
        lng: Set(payload.lng),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(inserted.id)
}

async fn set_map_object_translation(
    db: &DatabaseConnection,
    map_object_id: i32,
    locale: &str,
    translation: &MapObjectTranslationPayload,
) -> Result<(), ApiError> {
    let existing = map_object_translation::Entity::find()
        .filter(map_object_translation::Column::MapObjectId.eq(map_object_id))
        .filter(map_object_translation::Column::Locale.eq(locale))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let mut row: map_object_translation::ActiveModel = row.into();
            row.title = Set(translation.title.clone());
            row.address = Set(translation.address.clone());
            row.update(db).await?;
        }
        None => {
            map_object_translation::ActiveModel {
                map_object_id: Set(map_object_id),
                locale: Set(String::from(locale)),
                title: Set(translation.title.clone()),
                address: Set(translation.address.clone()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    Ok(())
}

/// the full validate-assemble-persist pipeline shared by station creation
/// and updates, `existing` informed means a full overwrite of that row
pub async fn save_station(
    db: &DatabaseConnection,
    dto: &SaveStationDto,
    existing: Option<filling_station::Model>,
) -> Result<filling_station::Model, ApiError> {
    if !user_exists(db, dto.user_id).await? {
        return Err(ApiError::Validation(format!(
            "user doesn't exist -> id: {}",
            dto.user_id
        )));
    }

    let fuel_types_ids = dto.fuel_type_ids()?;
    assert_fuel_types_exist(db, &fuel_types_ids).await?;

    let languages = supported_languages(db).await?;

    let translations = dto.translations()?;
    assert_supported_locales(translations.keys(), &languages)?;

    let map_object_id = resolve_map_object(db, dto, &languages).await?;

    let station = match existing {
        Some(station) => {
            let mut station: filling_station::ActiveModel = station.into();
            station.user_id = Set(dto.user_id);
            station.fuel_types_ids = Set(dto.fuel_types_ids.clone());

            // absent optional fields keep their previous value
            if let Some(phone_number) = &dto.phone_number {
                station.phone_number = Set(Some(phone_number.clone()));
            }

            station.map_object_id = Set(map_object_id);
            station.status = Set(true);

            station.update(db).await?
        }
        None => {
            filling_station::ActiveModel {
                user_id: Set(dto.user_id),
                fuel_types_ids: Set(dto.fuel_types_ids.clone()),
                phone_number: Set(dto.phone_number.clone()),
                map_object_id: Set(map_object_id),
                status: Set(true),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    set_station_translations(db, station.id, &translations).await?;

    Ok(station)
}

/// upserts the display name of a station for every supplied locale,
/// locales not supplied keep their stored value
pub async fn set_station_translations(
    db: &DatabaseConnection,
    station_id: i32,
    translations: &HashMap<String, StationTranslationPayload>,
) -> Result<(), ApiError> {
    for (locale, translation) in translations {
        let existing = filling_station_translation::Entity::find()
            .filter(filling_station_translation::Column::FillingStationId.eq(station_id))
            .filter(filling_station_translation::Column::Locale.eq(locale.clone()))
            .one(db)
            .await?;

        match existing {
            Some(row) => {
                let mut row: filling_station_translation::ActiveModel = row.into();
                row.cps_name = Set(translation.cps_name.clone());
                row.update(db).await?;
            }
            None => {
                filling_station_translation::ActiveModel {
                    filling_station_id: Set(station_id),
                    locale: Set(locale.clone()),
                    cps_name: Set(translation.cps_name.clone()),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }
    }

    Ok(())
}

pub async fn station_by_id(
    db: &DatabaseConnection,
    station_id: i32,
) -> Result<Option<filling_station::Model>, ApiError> {
    Ok(filling_station::Entity::find_by_id(station_id).one(db).await?)
}

pub async fn station_with_map_object(
    db: &DatabaseConnection,
    station_id: i32,
) -> Result<Option<(filling_station::Model, Option<map_object::Model>)>, ApiError> {
    Ok(filling_station::Entity::find_by_id(station_id)
        .find_also_related(map_object::Entity)
        .one(db)
        .await?)
}

/// all stations with their map object eagerly joined, insertion order
pub async fn list_stations(db: &DatabaseConnection) -> Result<Vec<StationDto>, ApiError> {
    let rows = filling_station::Entity::find()
        .find_also_related(map_object::Entity)
        .order_by_asc(filling_station::Column::Id)
        .all(db)
        .await?;

    let mut stations = Vec::with_capacity(rows.len());

    for (station, map_object) in rows {
        stations.push(decorate_station(db, station, map_object).await?);
    }

    Ok(stations)
}

/// resolves the fuel type set, display names and owner snapshot of a station
pub async fn decorate_station(
    db: &DatabaseConnection,
    station: filling_station::Model,
    map_object: Option<map_object::Model>,
) -> Result<StationDto, ApiError> {
    let fuel_types_ids = decode_fuel_types_ids(&station.fuel_types_ids)?;

    let fuel_types = fuel_type::Entity::find()
        .filter(fuel_type::Column::Id.is_in(fuel_types_ids.clone()))
        .all(db)
        .await?;

    let owner = user::Entity::find_by_id(station.user_id).one(db).await?;

    let translations = filling_station_translation::Entity::find()
        .filter(filling_station_translation::Column::FillingStationId.eq(station.id))
        .all(db)
        .await?
        .into_iter()
        .map(|translation| (translation.locale, translation.cps_name))
        .collect();

    let map_object = match map_object {
        Some(map_object) => {
            let map_translations = map_object_translation::Entity::find()
                .filter(map_object_translation::Column::MapObjectId.eq(map_object.id))
                .all(db)
                .await?;

            Some(MapObjectDto::from((map_object, map_translations)))
        }
        None => None,
    };

    Ok(StationDto {
        id: station.id,
        created_at: station.created_at.into(),
        user_id: station.user_id,
        fuel_types_ids,
        phone_number: station.phone_number,
        map_object_id: station.map_object_id,
        status: station.status,
        image: station.image,
        translations,
        map_object,
        fuel_types,
        user: owner.map(UserDto::from),
    })
}

/// binds (or clears) the uploaded image of a station
pub async fn set_station_image(
    db: &DatabaseConnection,
    station_id: i32,
    image: Option<String>,
) -> Result<(), ApiError> {
    filling_station::Entity::update_many()
        .col_expr(filling_station::Column::Image, Expr::value(image))
        .filter(filling_station::Column::Id.eq(station_id))
        .exec(db)
        .await?;

    Ok(())
}

/// deletes a station row, deleting a missing id is a successful no-op
pub async fn delete_station_row(db: &DatabaseConnection, station_id: i32) -> Result<(), ApiError> {
    filling_station::Entity::delete_by_id(station_id)
        .exec(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn user_model() -> user::Model {
        user::Model {
            id: 1,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            email: String::from("owner@host.com"),
            first_name: Some(String::from("name1")),
            last_name: None,
            password: String::from("$2b$12$hash"),
            language: String::from("am"),
            status: true,
            image: None,
        }
    }

    fn fuel_type_model(id: i32) -> fuel_type::Model {
        fuel_type::Model {
            id,
            name: String::from("petrol"),
        }
    }

    fn language_model(locale: &str) -> language::Model {
        language::Model {
            id: 1,
            locale: String::from(locale),
            name: String::from("Armenian"),
        }
    }

    fn save_dto(fuel_types_ids: &str) -> SaveStationDto {
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
    fn locales_outside_the_declared_set_are_rejected() {
        let languages = vec![language_model("am"), language_model("ru")];

        let supported = vec![String::from("am"), String::from("ru")];
        assert!(assert_supported_locales(supported.iter(), &languages).is_ok());

        let unsupported = vec![String::from("fr")];
        let error = assert_supported_locales(unsupported.iter(), &languages).unwrap_err();
        assert_eq!(
            error,
            ApiError::Validation(String::from("locale isn't supported -> fr"))
        );
    }

    #[tokio::test]
    async fn a_empty_fuel_type_list_fails_before_any_insert() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model()]])
            .into_connection();

        let error = save_station(&db, &save_dto("[]"), None).await.unwrap_err();
        assert_eq!(error, ApiError::Validation(String::from("fuel ids error")));

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("INSERT"));
    }

    #[tokio::test]
    async fn a_unknown_fuel_type_id_short_circuits() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model()]])
            .append_query_results([Vec::<fuel_type::Model>::new()])
            .into_connection();

        let error = save_station(&db, &save_dto("[7, 8]"), None)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ApiError::Validation(String::from("fuel type doesn't exist -> id: 7"))
        );
    }

    #[tokio::test]
    async fn a_station_without_a_map_object_reference_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model()]])
            .append_query_results([vec![fuel_type_model(1)]])
            .append_query_results([Vec::<language::Model>::new()])
            .into_connection();

        let error = save_station(&db, &save_dto("[1]"), None).await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Validation(String::from("map object or map object id must be informed"))
        );

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("INSERT"));
    }

    #[tokio::test]
    async fn a_unknown_owning_user_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let error = save_station(&db, &save_dto("[1]"), None).await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Validation(String::from("user doesn't exist -> id: 1"))
        );
    }

    #[tokio::test]
    async fn translations_with_a_unsupported_locale_are_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model()]])
            .append_query_results([vec![fuel_type_model(1)]])
            .append_query_results([vec![language_model("am")]])
            .into_connection();

        let mut dto = save_dto("[1]");
        dto.translations = Some(String::from(r#"{"fr": {"cps_name": "nom"}}"#));

        let error = save_station(&db, &dto, None).await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Validation(String::from("locale isn't supported -> fr"))
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_station_row_is_a_no_op_success() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        assert!(delete_station_row(&db, 42).await.is_ok());
    }
}
