// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    exam::session::ResultRecorder,
    store::{results::PgResultStore, status::PgStatusStore},
};

/// Lists every recorded attempt, newest first.
pub async fn list_all_results(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let status_store = PgStatusStore::new(pool.clone());
    let result_store = PgResultStore::new(pool);
    let recorder = ResultRecorder::new(&status_store, &result_store);

    let results = recorder.list_all().await?;
    Ok(Json(results))
}

/// Lists one user's attempts, newest first.
pub async fn list_user_results(
    State(pool): State<PgPool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let status_store = PgStatusStore::new(pool.clone());
    let result_store = PgResultStore::new(pool);
    let recorder = ResultRecorder::new(&status_store, &result_store);

    let results = recorder.list_by_user(user_id).await?;
    Ok(Json(results))
}
