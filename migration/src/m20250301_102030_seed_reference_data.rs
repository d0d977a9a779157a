use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // 'am' must stay first, it is the fallback locale
        let statement = r#"
        insert into
            "language" ("locale", "name")
        values
            ('am', 'Armenian'),
            ('ru', 'Russian'),
            ('en', 'English');

        insert into
            "fuel_type" ("name")
        values
            ('petrol'),
            ('premium petrol'),
            ('diesel'),
            ('gas'),
            ('cng');
        "#;

        db.execute_unprepared(statement).await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
