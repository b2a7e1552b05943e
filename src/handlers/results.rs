// src/handlers/results.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    exam::session::ResultRecorder,
    store::{results::PgResultStore, status::PgStatusStore},
    utils::jwt::Claims,
};

/// Lists the current user's attempts, newest first.
pub async fn my_results(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

    let status_store = PgStatusStore::new(pool.clone());
    let result_store = PgResultStore::new(pool);
    let recorder = ResultRecorder::new(&status_store, &result_store);

    let results = recorder.list_by_user(user_id).await?;
    Ok(Json(results))
}
