use crate::modules::{common, station, user};
use crate::server::controller;
use axum::Router;
use utoipa::openapi::{ContactBuilder, InfoBuilder, OpenApiBuilder};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(
        entity::language::Model,
        entity::fuel_type::Model,

        common::responses::ErrorEnvelope,
        common::responses::IdEnvelope,
        common::responses::UserEnvelope,
        common::responses::OptionalUserEnvelope,
        common::responses::UserListEnvelope,
        common::responses::StationEnvelope,
        common::responses::StationListEnvelope,

        user::dto::UserDto,
        user::dto::SaveUserDto,

        station::dto::StationDto,
        station::dto::SaveStationDto,
        station::dto::MapObjectDto,
        station::dto::MapObjectTranslationDto,
        station::dto::MapObjectPayload,
        station::dto::MapObjectTranslationPayload,
        station::dto::StationTranslationPayload,
    )),
    paths(
        controller::healthcheck,

        station::routes::list_stations,
        station::routes::create_station,
        station::routes::show_station,
        station::routes::update_station,
        station::routes::delete_station,

        user::routes::list_users,
        user::routes::create_user,
        user::routes::show_user,
        user::routes::update_user,
        user::routes::delete_user,
    ),
)]
struct ApiDoc;

pub fn create_openapi_router() -> Router<controller::AppState> {
    let builder: OpenApiBuilder = ApiDoc::openapi().into();

    let info = InfoBuilder::new()
        .title("CPS API")
        .description(Some(
            "Directory of filling stations and their managing users.",
        ))
        .version("0.0.1")
        .contact(Some(ContactBuilder::new().name(Some("CPS")).build()))
        .build();

    let api_doc = builder.info(info).build();

    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/docs/openapi.json", api_doc))
        .merge(RapiDoc::new("/docs/openapi.json").path("/rapidoc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_generated_doc_exposes_every_envelope_schema() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.unwrap().schemas;

        for name in [
            "IdEnvelope",
            "UserEnvelope",
            "OptionalUserEnvelope",
            "UserListEnvelope",
            "StationEnvelope",
            "StationListEnvelope",
            "ErrorEnvelope",
        ] {
            assert!(schemas.contains_key(name), "missing schema: {}", name);
        }
    }
}
