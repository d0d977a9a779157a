use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Per locale display name of a filling station
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(title = "FillingStationTranslation")]
#[sea_orm(table_name = "filling_station_translation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub filling_station_id: i32,
    pub locale: String,
    pub cps_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::filling_station::Entity",
        from = "Column::FillingStationId",
        to = "super::filling_station::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    FillingStation,
}

impl Related<super::filling_station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FillingStation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
