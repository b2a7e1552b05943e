// src/models/user.rs

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static ADMISSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Unique login email.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub name: String,
    pub phone: String,
    pub admission_number: String,

    /// Academic engineering discipline, used to bias the question mix.
    pub branch: String,

    /// User role: 'user' or 'admin'.
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email must be a valid address."))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name is required."))]
    pub name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Phone number must be exactly 10 digits."))]
    pub phone: String,

    #[validate(regex(
        path = *ADMISSION_REGEX,
        message = "Admission number must be exactly 6 digits."
    ))]
    pub admission_number: String,

    #[validate(length(min = 1, max = 100, message = "Branch is required."))]
    pub branch: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address."))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Password is required."))]
    pub password: String,
}

/// DTO for requesting a password reset token.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Email must be a valid address."))]
    pub email: String,
}

/// DTO for completing a password reset.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required."))]
    pub token: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub new_password: String,
}
