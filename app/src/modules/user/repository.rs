use super::dto::SaveUserDto;
use crate::modules::common::error::ApiError;
use entity::user;
use migration::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ApiError> {
    Ok(user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

pub async fn user_by_id(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<user::Model>, ApiError> {
    Ok(user::Entity::find_by_id(user_id).one(db).await?)
}

async fn email_in_use(db: &DatabaseConnection, email: &str) -> Result<bool, ApiError> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .is_some())
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|_| ApiError::Persistence(String::from("failed to hash the password")))
}

pub async fn create_user(
    db: &DatabaseConnection,
    dto: &SaveUserDto,
    fallback_locale: &str,
) -> Result<user::Model, ApiError> {
    let email = dto
        .email
        .as_ref()
        .ok_or_else(|| ApiError::Validation(String::from("email must be informed")))?;

    let password = dto
        .password
        .as_ref()
        .ok_or_else(|| ApiError::Validation(String::from("password must be informed")))?;

    if email_in_use(db, email).await? {
        return Err(ApiError::Validation(format!(
            "email already in use -> {}",
            email
        )));
    }

    let user = user::ActiveModel {
        email: Set(email.clone()),
        first_name: Set(dto.first_name.clone()),
        last_name: Set(dto.last_name.clone()),
        password: Set(hash_password(password)?),
        language: Set(dto
            .language
            .clone()
            .unwrap_or_else(|| String::from(fallback_locale))),
        status: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(user)
}

/// overwrites a user row with the informed fields
///
/// absent optional fields keep their stored value, except `language` which
/// falls back to the fallback locale and `status` which is always set active.
pub async fn update_user(
    db: &DatabaseConnection,
    existing: user::Model,
    dto: &SaveUserDto,
    fallback_locale: &str,
) -> Result<user::Model, ApiError> {
    let mut user: user::ActiveModel = existing.into();

    if let Some(email) = &dto.email {
        user.email = Set(email.clone());
    }

    if let Some(first_name) = &dto.first_name {
        user.first_name = Set(Some(first_name.clone()));
    }

    if let Some(last_name) = &dto.last_name {
        user.last_name = Set(Some(last_name.clone()));
    }

    if let Some(password) = &dto.password {
        user.password = Set(hash_password(password)?);
    }

    user.language = Set(dto
        .language
        .clone()
        .unwrap_or_else(|| String::from(fallback_locale)));
    user.status = Set(true);

    Ok(user.update(db).await?)
}

/// binds (or clears) the uploaded profile image of a user
pub async fn set_user_image(
    db: &DatabaseConnection,
    user_id: i32,
    image: Option<String>,
) -> Result<(), ApiError> {
    user::Entity::update_many()
        .col_expr(user::Column::Image, Expr::value(image))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;

    Ok(())
}

pub async fn delete_user_row(db: &DatabaseConnection, user_id: i32) -> Result<(), ApiError> {
    user::Entity::delete_by_id(user_id).exec(db).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_model(language: &str) -> user::Model {
        user::Model {
            id: 1,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            email: String::from("user@host.com"),
            first_name: None,
            last_name: None,
            password: String::from("$2b$12$hash"),
            language: String::from(language),
            status: true,
            image: None,
        }
    }

    fn save_dto() -> SaveUserDto {
        SaveUserDto {
            image: None,
            email: None,
            first_name: None,
            last_name: None,
            password: None,
            language: None,
        }
    }

    #[tokio::test]
    async fn creating_without_a_email_is_rejected_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let error = create_user(&db, &save_dto(), "am").await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Validation(String::from("email must be informed"))
        );
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn creating_with_a_taken_email_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model("am")]])
            .into_connection();

        let mut dto = save_dto();
        dto.email = Some(String::from("user@host.com"));
        dto.password = Some(String::from("some password"));

        let error = create_user(&db, &dto, "am").await.unwrap_err();

        assert_eq!(
            error,
            ApiError::Validation(String::from("email already in use -> user@host.com"))
        );

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("INSERT"));
    }

    #[tokio::test]
    async fn updating_without_a_language_falls_back_to_the_default_locale() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model("am")]])
            .into_connection();

        let updated = update_user(&db, user_model("ru"), &save_dto(), "am")
            .await
            .unwrap();

        assert_eq!(updated.language, "am");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"String(Some("am"))"#));
    }

    #[tokio::test]
    async fn updating_never_stores_a_plaintext_password() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model("am")]])
            .into_connection();

        let mut dto = save_dto();
        dto.password = Some(String::from("plaintext password"));

        update_user(&db, user_model("am"), &dto, "am").await.unwrap();

        let log = format!("{:?}", db.into_transaction_log());
        assert!(!log.contains("plaintext password"));
    }
}
