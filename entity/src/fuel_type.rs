use sea_orm::entity::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Reference entity describing a kind of fuel a station may offer
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, ToSchema)]
#[schema(title = "FuelType")]
#[sea_orm(table_name = "fuel_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
