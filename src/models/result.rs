// src/models/result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// One graded answer. `is_correct` is always derived server-side from the
/// question bank, never taken from the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: i64,
    pub selected_option: usize,
    pub is_correct: bool,
}

/// Terminal state recorded on a test attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptStatus {
    Completed,
    InProgress,
    Abandoned,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Completed => "completed",
            AttemptStatus::InProgress => "in-progress",
            AttemptStatus::Abandoned => "abandoned",
        }
    }
}

/// Represents the 'test_results' table. Append-only: a row is written once
/// on submission and never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestResult {
    pub id: i64,
    pub user_id: i64,

    /// Profile fields denormalized at submission time.
    pub user_name: String,
    pub user_email: String,
    pub admission_number: String,
    pub branch: String,

    pub score: i64,
    pub total_questions: i64,
    pub percentage: i64,
    pub time_spent_seconds: i64,

    /// Graded answers, stored as a JSONB array.
    pub answers: Json<Vec<Answer>>,

    pub completed_at: DateTime<Utc>,
    pub status: String,
}

/// A completed attempt about to be recorded. `completed_at` is stamped by
/// the recorder at write time, so it is not a field here.
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub admission_number: String,
    pub branch: String,
    pub score: i64,
    pub total_questions: i64,
    pub percentage: i64,
    pub time_spent_seconds: i64,
    pub answers: Vec<Answer>,
    pub status: AttemptStatus,
}

/// One raw (ungraded) answer as submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAnswer {
    pub question_id: i64,
    pub selected_option: usize,
}

/// DTO for submitting a finished paper.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitExamRequest {
    #[validate(length(min = 1, message = "No answers submitted."))]
    pub answers: Vec<RawAnswer>,

    #[validate(range(min = 0, message = "Time spent cannot be negative."))]
    pub time_spent_seconds: i64,
}
