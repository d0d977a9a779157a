pub use sea_orm_migration::prelude::*;

mod m20250301_101500_init;
mod m20250301_102030_seed_reference_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_101500_init::Migration),
            Box::new(m20250301_102030_seed_reference_data::Migration),
        ]
    }
}
