// src/store/results.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use crate::models::result::{NewTestResult, TestResult};
use crate::store::StoreError;

/// Adapter over the append-only 'test_results' collection.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Appends a result, stamping `completed_at`, and returns the new id.
    async fn add(
        &self,
        result: &NewTestResult,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, StoreError>;

    /// One user's attempts, newest first.
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<TestResult>, StoreError>;

    /// All attempts, newest first. Ordering is done store-side.
    async fn list_all(&self) -> Result<Vec<TestResult>, StoreError>;
}

const RESULT_COLUMNS: &str = "id, user_id, user_name, user_email, admission_number, branch, \
     score, total_questions, percentage, time_spent_seconds, answers, completed_at, status";

/// PostgreSQL-backed `ResultStore`.
#[derive(Clone)]
pub struct PgResultStore {
    pool: PgPool,
}

impl PgResultStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultStore for PgResultStore {
    async fn add(
        &self,
        result: &NewTestResult,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO test_results
                (user_id, user_name, user_email, admission_number, branch,
                 score, total_questions, percentage, time_spent_seconds,
                 answers, completed_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(result.user_id)
        .bind(&result.user_name)
        .bind(&result.user_email)
        .bind(&result.admission_number)
        .bind(&result.branch)
        .bind(result.score)
        .bind(result.total_questions)
        .bind(result.percentage)
        .bind(result.time_spent_seconds)
        .bind(Json(&result.answers))
        .bind(completed_at)
        .bind(result.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<TestResult>, StoreError> {
        let results = sqlx::query_as::<_, TestResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM test_results \
             WHERE user_id = $1 ORDER BY completed_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    async fn list_all(&self) -> Result<Vec<TestResult>, StoreError> {
        let results = sqlx::query_as::<_, TestResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM test_results ORDER BY completed_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}

/// In-memory `ResultStore` used by the recorder unit tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryResultStore {
        rows: Mutex<Vec<TestResult>>,
        fail_next_add: Mutex<bool>,
    }

    impl MemoryResultStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_next_add(&self) {
            *self.fail_next_add.lock().unwrap() = true;
        }
    }

    #[async_trait]
    impl ResultStore for MemoryResultStore {
        async fn add(
            &self,
            result: &NewTestResult,
            completed_at: DateTime<Utc>,
        ) -> Result<i64, StoreError> {
            if std::mem::take(&mut *self.fail_next_add.lock().unwrap()) {
                return Err(StoreError::Transient("injected".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i64 + 1;
            rows.push(TestResult {
                id,
                user_id: result.user_id,
                user_name: result.user_name.clone(),
                user_email: result.user_email.clone(),
                admission_number: result.admission_number.clone(),
                branch: result.branch.clone(),
                score: result.score,
                total_questions: result.total_questions,
                percentage: result.percentage,
                time_spent_seconds: result.time_spent_seconds,
                answers: Json(result.answers.clone()),
                completed_at,
                status: result.status.as_str().to_string(),
            });
            Ok(id)
        }

        async fn list_by_user(&self, user_id: i64) -> Result<Vec<TestResult>, StoreError> {
            let mut rows: Vec<TestResult> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
            Ok(rows)
        }

        async fn list_all(&self) -> Result<Vec<TestResult>, StoreError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
            Ok(rows)
        }
    }
}
