use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let statement = r#"
        create table "language" (
            "id" serial primary key,
            "locale" varchar(8) not null,
            "name" varchar(255) not null
        );

        alter table
            "language"
        add
            constraint "language_locale_unique" unique ("locale");

        create table "fuel_type" (
            "id" serial primary key,
            "name" varchar(255) not null
        );

        alter table
            "fuel_type"
        add
            constraint "fuel_type_name_unique" unique ("name");

        create table "user" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "email" varchar(255) not null,
            "first_name" varchar(255) null,
            "last_name" varchar(255) null,
            "password" varchar(255) not null,
            "language" varchar(8) not null default 'am',
            "status" boolean not null default true,
            "image" varchar(255) null
        );

        alter table
            "user"
        add
            constraint "user_email_unique" unique ("email");

        create table "map_object" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "lat" double precision not null,
            "lng" double precision not null
        );

        create table "map_object_translation" (
            "id" serial primary key,
            "map_object_id" int not null,
            "locale" varchar(8) not null,
            "title" varchar(255) null,
            "address" varchar(255) null
        );

        alter table
            "map_object_translation"
        add
            constraint "map_object_translation_unique" unique ("map_object_id", "locale");

        create table "filling_station" (
            "id" serial primary key,
            "created_at" timestamptz(0) not null default now(),
            "user_id" int not null,
            "fuel_types_ids" text not null,
            "phone_number" varchar(32) null,
            "map_object_id" int not null,
            "status" boolean not null default true,
            "image" varchar(255) null
        );

        create table "filling_station_translation" (
            "id" serial primary key,
            "filling_station_id" int not null,
            "locale" varchar(8) not null,
            "cps_name" varchar(255) not null
        );

        alter table
            "filling_station_translation"
        add
            constraint "filling_station_translation_unique" unique ("filling_station_id", "locale");

        alter table
            "map_object_translation"
        add
            constraint "map_object_translation_map_object_id_foreign" foreign key ("map_object_id") references "map_object" ("id") on update cascade on delete cascade;

        alter table
            "filling_station"
        add
            constraint "filling_station_user_id_foreign" foreign key ("user_id") references "user" ("id") on update cascade;

        alter table
            "filling_station"
        add
            constraint "filling_station_map_object_id_foreign" foreign key ("map_object_id") references "map_object" ("id") on update cascade;

        alter table
            "filling_station_translation"
        add
            constraint "filling_station_translation_filling_station_id_foreign" foreign key ("filling_station_id") references "filling_station" ("id") on update cascade on delete cascade;
        "#;

        db.execute_unprepared(statement).await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(String::from("cannot be reverted")))
    }
}
