// src/store/status.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::session::{SessionStatus, StatusPatch};
use crate::store::StoreError;

/// Adapter over the 'user_test_status' collection.
///
/// The contract is deliberately two-step: `try_get` is a pure read and never
/// writes, so the create-on-absence behavior lives one layer up in the
/// session tracker where it is visible to callers. The tab-switch increment
/// is a store primitive so it can be a single atomic statement instead of a
/// racy read-increment-write.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Reads the record, or `None` if the user has never been tracked.
    async fn try_get(&self, user_id: i64) -> Result<Option<SessionStatus>, StoreError>;

    /// Writes the full record, inserting or replacing (upsert).
    async fn put(&self, status: &SessionStatus) -> Result<(), StoreError>;

    /// Merges a partial update into an existing record, refreshing
    /// `last_activity`. Fails with `NotFound` if the record is absent.
    async fn merge(
        &self,
        user_id: i64,
        patch: &StatusPatch,
        last_activity: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Atomically increments the tab-switch count, creating the record with
    /// a count of 1 if absent. Returns the new count.
    async fn increment_tab_switch(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError>;
}

/// PostgreSQL-backed `StatusStore`.
#[derive(Clone)]
pub struct PgStatusStore {
    pool: PgPool,
}

impl PgStatusStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusStore for PgStatusStore {
    async fn try_get(&self, user_id: i64) -> Result<Option<SessionStatus>, StoreError> {
        let status = sqlx::query_as::<_, SessionStatus>(
            r#"
            SELECT user_id, has_submitted, submission_time,
                   tab_switch_count, is_cancelled, last_activity
            FROM user_test_status
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status)
    }

    async fn put(&self, status: &SessionStatus) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_test_status
                (user_id, has_submitted, submission_time,
                 tab_switch_count, is_cancelled, last_activity)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE SET
                has_submitted = EXCLUDED.has_submitted,
                submission_time = EXCLUDED.submission_time,
                tab_switch_count = EXCLUDED.tab_switch_count,
                is_cancelled = EXCLUDED.is_cancelled,
                last_activity = EXCLUDED.last_activity
            "#,
        )
        .bind(status.user_id)
        .bind(status.has_submitted)
        .bind(status.submission_time)
        .bind(status.tab_switch_count)
        .bind(status.is_cancelled)
        .bind(status.last_activity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn merge(
        &self,
        user_id: i64,
        patch: &StatusPatch,
        last_activity: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        // Dynamic SET clause: only the fields present in the patch are
        // written, plus the unconditional last_activity refresh.
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE user_test_status SET last_activity = ");
        builder.push_bind(last_activity);

        if let Some(v) = patch.has_submitted {
            builder.push(", has_submitted = ");
            builder.push_bind(v);
        }
        if let Some(v) = patch.submission_time {
            builder.push(", submission_time = ");
            builder.push_bind(v);
        }
        if let Some(v) = patch.tab_switch_count {
            builder.push(", tab_switch_count = ");
            builder.push_bind(v);
        }
        if let Some(v) = patch.is_cancelled {
            builder.push(", is_cancelled = ");
            builder.push_bind(v);
        }

        builder.push(" WHERE user_id = ");
        builder.push_bind(user_id);

        let result = builder.build().execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn increment_tab_switch(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<i64, StoreError> {
        let new_count = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO user_test_status (user_id, tab_switch_count, last_activity)
            VALUES ($1, 1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                tab_switch_count = user_test_status.tab_switch_count + 1,
                last_activity = EXCLUDED.last_activity
            RETURNING tab_switch_count
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(new_count)
    }
}

/// In-memory `StatusStore` used by the session tracker unit tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStatusStore {
        records: Mutex<HashMap<i64, SessionStatus>>,
        /// When set, `try_get` fails once with the given error kind.
        fail_next_read: Mutex<Option<StoreError>>,
    }

    impl MemoryStatusStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_next_read_with(&self, err: StoreError) {
            *self.fail_next_read.lock().unwrap() = Some(err);
        }

        pub fn raw(&self, user_id: i64) -> Option<SessionStatus> {
            self.records.lock().unwrap().get(&user_id).cloned()
        }
    }

    #[async_trait]
    impl StatusStore for MemoryStatusStore {
        async fn try_get(&self, user_id: i64) -> Result<Option<SessionStatus>, StoreError> {
            if let Some(err) = self.fail_next_read.lock().unwrap().take() {
                return Err(err);
            }
            Ok(self.records.lock().unwrap().get(&user_id).cloned())
        }

        async fn put(&self, status: &SessionStatus) -> Result<(), StoreError> {
            self.records
                .lock()
                .unwrap()
                .insert(status.user_id, status.clone());
            Ok(())
        }

        async fn merge(
            &self,
            user_id: i64,
            patch: &StatusPatch,
            last_activity: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            let mut records = self.records.lock().unwrap();
            let current = records.get(&user_id).ok_or(StoreError::NotFound)?.clone();
            records.insert(user_id, current.apply(patch, last_activity));
            Ok(())
        }

        async fn increment_tab_switch(
            &self,
            user_id: i64,
            now: DateTime<Utc>,
        ) -> Result<i64, StoreError> {
            let mut records = self.records.lock().unwrap();
            let entry = records
                .entry(user_id)
                .or_insert_with(|| SessionStatus::fresh(user_id, now));
            entry.tab_switch_count += 1;
            entry.last_activity = now;
            Ok(entry.tab_switch_count)
        }
    }
}
