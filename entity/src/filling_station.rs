use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(title = "FillingStation")]
#[sea_orm(table_name = "filling_station")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub user_id: i32,
    /// JSON encoded array of fuel type ids, eg: `[1, 2, 3]`
    pub fuel_types_ids: String,
    pub phone_number: Option<String>,
    pub map_object_id: i32,
    pub status: bool,
    /// storage key of the station image
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::map_object::Entity",
        from = "Column::MapObjectId",
        to = "super::map_object::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    MapObject,
    #[sea_orm(has_many = "super::filling_station_translation::Entity")]
    FillingStationTranslation,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::map_object::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MapObject.def()
    }
}

impl Related<super::filling_station_translation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FillingStationTranslation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
