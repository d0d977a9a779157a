use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Per locale title and address of a map object
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(title = "MapObjectTranslation")]
#[sea_orm(table_name = "map_object_translation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub map_object_id: i32,
    pub locale: String,
    pub title: Option<String>,
    pub address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::map_object::Entity",
        from = "Column::MapObjectId",
        to = "super::map_object::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    MapObject,
}

impl Related<super::map_object::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MapObject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
