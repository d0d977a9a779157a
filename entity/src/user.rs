use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(title = "User")]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// bcrypt hash, never serialized on any read path
    #[serde(skip_serializing)]
    pub password: String,
    pub language: String,
    pub status: bool,
    /// storage key of the user avatar
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::filling_station::Entity")]
    FillingStation,
}

impl Related<super::filling_station::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FillingStation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
