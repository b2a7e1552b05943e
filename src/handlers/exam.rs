// src/handlers/exam.rs
//
// The exam session controller: every endpoint here drives one user's
// session through NotStarted -> InProgress -> {Submitted | Cancelled}.
// Policy that the tracker deliberately does not enforce (window checks,
// double-submission, the tab-switch ceiling) lives in these handlers.

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    bank,
    config::{Config, EXAM_QUESTION_COUNT},
    error::AppError,
    exam::{
        scorer::{grade_of, score},
        selector::select_questions,
        session::{ResultRecorder, SessionTracker},
    },
    models::{
        question::PublicQuestion,
        result::{Answer, AttemptStatus, NewTestResult, SubmitExamRequest},
        session::SessionStatus,
    },
    store::{
        results::PgResultStore,
        status::PgStatusStore,
        users,
    },
    utils::jwt::Claims,
};

fn current_user_id(claims: &Claims) -> Result<i64, AppError> {
    claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))
}

/// Rejects any state in which the user may not sit (or submit) the paper.
fn ensure_session_open(status: &SessionStatus) -> Result<(), AppError> {
    if status.has_submitted {
        return Err(AppError::Conflict(
            "You have already submitted the test".to_string(),
        ));
    }
    if status.is_cancelled {
        return Err(AppError::Forbidden(
            "Your test has been cancelled".to_string(),
        ));
    }
    Ok(())
}

/// Returns the global exam window and whether it is currently open.
pub async fn window(State(config): State<Config>) -> impl IntoResponse {
    let window = &config.exam;
    Json(json!({
        "start_time": window.start_time,
        "end_time": window.end_time(),
        "duration_minutes": window.duration_minutes,
        "max_tab_switches": window.max_tab_switches,
        "available": window.is_available(Utc::now())
    }))
}

/// Generates a branch-appropriate paper for the current user.
/// Answer keys are stripped via the `PublicQuestion` DTO.
pub async fn paper(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user_id(&claims)?;

    if !config.exam.is_available(Utc::now()) {
        return Err(AppError::Forbidden(
            "The test is not open yet".to_string(),
        ));
    }

    let user = users::find_by_id(&pool, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let status_store = PgStatusStore::new(pool);
    let tracker = SessionTracker::new(&status_store);
    let status = tracker.get_or_create(user_id).await?;
    ensure_session_open(&status)?;

    let questions = select_questions(&user.branch, EXAM_QUESTION_COUNT, &mut rand::thread_rng());
    let public: Vec<PublicQuestion> = questions.iter().map(PublicQuestion::from).collect();

    Ok(Json(public))
}

/// Returns the user's session status, creating the default record on first
/// access.
pub async fn status(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user_id(&claims)?;

    let status_store = PgStatusStore::new(pool);
    let tracker = SessionTracker::new(&status_store);
    let status = tracker.get_or_create(user_id).await?;

    Ok(Json(json!({
        "status": status,
        "phase": status.phase()
    })))
}

/// Records one tab switch. Crossing the configured ceiling cancels the
/// session on the spot.
pub async fn tab_switch(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user_id(&claims)?;

    let status_store = PgStatusStore::new(pool);
    let tracker = SessionTracker::new(&status_store);
    let new_count = tracker.increment_tab_switch(user_id).await?;

    let cancelled = new_count > config.exam.max_tab_switches;
    if cancelled {
        tracker.cancel(user_id).await?;
        tracing::warn!(user_id, new_count, "session cancelled for tab switching");
    }

    Ok(Json(json!({
        "tab_switch_count": new_count,
        "max_tab_switches": config.exam.max_tab_switches,
        "cancelled": cancelled
    })))
}

/// Cancels the user's session.
pub async fn cancel(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = current_user_id(&claims)?;

    let status_store = PgStatusStore::new(pool);
    let tracker = SessionTracker::new(&status_store);
    tracker.cancel(user_id).await?;

    Ok(Json(json!({
        "message": "Test cancelled"
    })))
}

/// Submits a finished paper: grades it against the bank, records the
/// attempt, and returns score, percentage and grade.
pub async fn submit(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user_id = current_user_id(&claims)?;

    if !config.exam.is_available(Utc::now()) {
        return Err(AppError::Forbidden(
            "The test is not open yet".to_string(),
        ));
    }

    let user = users::find_by_id(&pool, user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let status_store = PgStatusStore::new(pool.clone());
    let tracker = SessionTracker::new(&status_store);
    let status = tracker.get_or_create(user_id).await?;
    ensure_session_open(&status)?;

    // Grade server-side; the client never supplies correctness.
    let mut answers = Vec::with_capacity(payload.answers.len());
    for raw in &payload.answers {
        let question = bank::find(raw.question_id).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown question id {}", raw.question_id))
        })?;
        if raw.selected_option >= question.options.len() {
            return Err(AppError::BadRequest(format!(
                "Selected option out of range for question {}",
                raw.question_id
            )));
        }
        answers.push(Answer {
            question_id: raw.question_id,
            selected_option: raw.selected_option,
            is_correct: raw.selected_option == question.correct_option,
        });
    }

    let summary = score(&answers);
    let grade = grade_of(summary.percentage);

    let result = NewTestResult {
        user_id,
        user_name: user.name,
        user_email: user.email,
        admission_number: user.admission_number,
        branch: user.branch,
        score: summary.score,
        total_questions: answers.len() as i64,
        percentage: summary.percentage,
        time_spent_seconds: payload.time_spent_seconds,
        answers,
        status: AttemptStatus::Completed,
    };

    let result_store = PgResultStore::new(pool);
    let recorder = ResultRecorder::new(&status_store, &result_store);
    let id = recorder.submit(&result).await?;

    Ok(Json(json!({
        "id": id,
        "score": summary.score,
        "total_questions": result.total_questions,
        "percentage": summary.percentage,
        "grade": grade.grade,
        "message": grade.message
    })))
}
