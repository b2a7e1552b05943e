// src/store/users.rs
//
// User profile queries. The profile is an input to question selection and
// result stamping; it is not part of the session core, so plain functions
// over the pool are enough here.

use sqlx::PgPool;

use crate::models::user::User;
use crate::store::StoreError;

const USER_COLUMNS: &str = "id, email, password, name, phone, admission_number, \
     branch, role, created_at, updated_at";

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub phone: &'a str,
    pub admission_number: &'a str,
    pub branch: &'a str,
    pub role: &'a str,
}

/// Inserts a user and returns the stored row.
/// A unique-violation on the email surfaces as is so the caller can map it
/// to a conflict response.
pub async fn insert(pool: &PgPool, new_user: &NewUser<'_>) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password, name, phone, admission_number, branch, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.name)
    .bind(new_user.phone)
    .bind(new_user.admission_number)
    .bind(new_user.branch)
    .bind(new_user.role)
    .fetch_one(pool)
    .await
}

pub async fn update_password(
    pool: &PgPool,
    user_id: i64,
    password_hash: &str,
) -> Result<(), StoreError> {
    let result = sqlx::query(
        "UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2",
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
