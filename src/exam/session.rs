// src/exam/session.rs
//
// Session status tracker and result recorder, generic over the store
// traits. All semantics that the HTTP layer relies on live here: lazy
// creation on first read, merge-then-upsert updates, the atomic tab-switch
// increment, and the two-phase submission.

use chrono::Utc;

use crate::models::result::{NewTestResult, TestResult};
use crate::models::session::{SessionStatus, StatusPatch};
use crate::store::StoreError;
use crate::store::results::ResultStore;
use crate::store::status::StatusStore;

/// Per-user session bookkeeping over a `StatusStore`.
pub struct SessionTracker<'a, S: StatusStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: StatusStore + ?Sized> SessionTracker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reads the user's status, creating the default record on first access.
    ///
    /// A read answered with `NotFound` or `PermissionDenied` is treated the
    /// same as an absent record: the default is written and returned. Other
    /// read errors propagate. A repeat call with no intervening write is a
    /// pure read and does not touch `last_activity`.
    pub async fn get_or_create(&self, user_id: i64) -> Result<SessionStatus, StoreError> {
        match self.store.try_get(user_id).await {
            Ok(Some(status)) => Ok(status),
            Ok(None) | Err(StoreError::NotFound) | Err(StoreError::PermissionDenied) => {
                let fresh = SessionStatus::fresh(user_id, Utc::now());
                self.store.put(&fresh).await?;
                Ok(fresh)
            }
            Err(other) => Err(other),
        }
    }

    /// Merges a partial update, refreshing `last_activity`. If the record
    /// does not exist yet the update is retried as a full upsert of the
    /// defaults plus the patch.
    pub async fn update(&self, user_id: i64, patch: StatusPatch) -> Result<(), StoreError> {
        let now = Utc::now();
        match self.store.merge(user_id, &patch, now).await {
            Err(StoreError::NotFound) => {
                let status = SessionStatus::fresh(user_id, now).apply(&patch, now);
                self.store.put(&status).await
            }
            other => other,
        }
    }

    pub async fn mark_submitted(&self, user_id: i64) -> Result<(), StoreError> {
        self.update(
            user_id,
            StatusPatch {
                has_submitted: Some(true),
                submission_time: Some(Utc::now()),
                ..StatusPatch::default()
            },
        )
        .await
    }

    /// Atomic increment via the store primitive; returns the new count.
    pub async fn increment_tab_switch(&self, user_id: i64) -> Result<i64, StoreError> {
        self.store.increment_tab_switch(user_id, Utc::now()).await
    }

    pub async fn cancel(&self, user_id: i64) -> Result<(), StoreError> {
        self.update(
            user_id,
            StatusPatch {
                is_cancelled: Some(true),
                ..StatusPatch::default()
            },
        )
        .await
    }
}

/// Records completed attempts and reads them back.
pub struct ResultRecorder<'a, S: StatusStore + ?Sized, R: ResultStore + ?Sized> {
    statuses: &'a S,
    results: &'a R,
}

impl<'a, S: StatusStore + ?Sized, R: ResultStore + ?Sized> ResultRecorder<'a, S, R> {
    pub fn new(statuses: &'a S, results: &'a R) -> Self {
        Self { statuses, results }
    }

    /// Two-phase submission: mark the status submitted, then append the
    /// immutable result stamped with the current time. The phases are
    /// independent writes with no cross-entity atomicity; a failure after
    /// phase one leaves `has_submitted` set with no matching result row,
    /// which is logged and surfaced, not rolled back.
    pub async fn submit(&self, result: &NewTestResult) -> Result<i64, StoreError> {
        let tracker = SessionTracker::new(self.statuses);
        tracker.mark_submitted(result.user_id).await?;

        match self.results.add(result, Utc::now()).await {
            Ok(id) => Ok(id),
            Err(e) => {
                tracing::warn!(
                    user_id = result.user_id,
                    "result append failed after submission mark: {e}"
                );
                Err(e)
            }
        }
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<TestResult>, StoreError> {
        self.results.list_by_user(user_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<TestResult>, StoreError> {
        self.results.list_all().await
    }
}
