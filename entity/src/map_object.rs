use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Geocoded point shared by reference across filling stations
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(title = "MapObject")]
#[sea_orm(table_name = "map_object")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::filling_station::Entity")]
    FillingStation,
    #[sea_orm(has_many = "super::map_object_translation::Entity")]
    MapObjectTranslation,
}

impl Related<super::filling_station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FillingStation.def()
    }
}

impl Related<super::map_object_translation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MapObjectTranslation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
