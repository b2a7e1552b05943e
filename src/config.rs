// src/config.rs

use dotenvy::dotenv;
use std::env;

use crate::exam::window::ExamWindow;

/// Number of questions on a generated paper.
pub const EXAM_QUESTION_COUNT: usize = 20;

const DEFAULT_EXAM_START: &str = "2025-08-30T21:30:00Z";
const DEFAULT_EXAM_DURATION_MINUTES: i64 = 10;
const DEFAULT_MAX_TAB_SWITCHES: i64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    /// The single global exam window shared by all candidates.
    pub exam: ExamWindow,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let admin_email = env::var("ADMIN_EMAIL").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        let start_time = env::var("EXAM_START_TIME")
            .unwrap_or_else(|_| DEFAULT_EXAM_START.to_string())
            .parse::<chrono::DateTime<chrono::Utc>>()
            .expect("EXAM_START_TIME must be a valid RFC 3339 timestamp");

        let duration_minutes = env::var("EXAM_DURATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EXAM_DURATION_MINUTES);

        let max_tab_switches = env::var("EXAM_MAX_TAB_SWITCHES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TAB_SWITCHES);

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            admin_email,
            admin_password,
            exam: ExamWindow {
                start_time,
                duration_minutes,
                max_tab_switches,
            },
        }
    }
}
