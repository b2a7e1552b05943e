// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'user_test_status' table: one row per user, created lazily
/// on first status access and never deleted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SessionStatus {
    pub user_id: i64,
    pub has_submitted: bool,
    pub submission_time: Option<DateTime<Utc>>,
    pub tab_switch_count: i64,
    pub is_cancelled: bool,
    pub last_activity: DateTime<Utc>,
}

/// Lifecycle phase derived from the stored flags.
/// `NotStarted` is represented by the absence of a row, so a materialized
/// status is always in one of these three phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    InProgress,
    Submitted,
    Cancelled,
}

impl SessionStatus {
    /// Default record for a user whose status has never been touched.
    pub fn fresh(user_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            has_submitted: false,
            submission_time: None,
            tab_switch_count: 0,
            is_cancelled: false,
            last_activity: now,
        }
    }

    /// Submission wins over cancellation if both flags are somehow set:
    /// the first marked submission is authoritative.
    pub fn phase(&self) -> SessionPhase {
        if self.has_submitted {
            SessionPhase::Submitted
        } else if self.is_cancelled {
            SessionPhase::Cancelled
        } else {
            SessionPhase::InProgress
        }
    }

    /// Applies a partial update, leaving unset fields untouched.
    pub fn apply(mut self, patch: &StatusPatch, now: DateTime<Utc>) -> Self {
        if let Some(v) = patch.has_submitted {
            self.has_submitted = v;
        }
        if let Some(v) = patch.submission_time {
            self.submission_time = Some(v);
        }
        if let Some(v) = patch.tab_switch_count {
            self.tab_switch_count = v;
        }
        if let Some(v) = patch.is_cancelled {
            self.is_cancelled = v;
        }
        self.last_activity = now;
        self
    }
}

/// Partial update of a `SessionStatus`. `last_activity` is not part of the
/// patch: every merge refreshes it to the time of the write.
#[derive(Debug, Clone, Default)]
pub struct StatusPatch {
    pub has_submitted: Option<bool>,
    pub submission_time: Option<DateTime<Utc>>,
    pub tab_switch_count: Option<i64>,
    pub is_cancelled: Option<bool>,
}
