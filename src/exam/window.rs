// src/exam/window.rs

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// The single global exam window: one start time, one duration and one
/// tab-switch ceiling shared by all candidates. Carried in `Config` and
/// passed explicitly so tests can probe arbitrary clock values.
#[derive(Debug, Clone, Serialize)]
pub struct ExamWindow {
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub max_tab_switches: i64,
}

impl ExamWindow {
    /// The exam opens at the start time and the flag stays up afterwards;
    /// the running clock inside the window is the client's concern.
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        now >= self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.start_time + Duration::minutes(self.duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> ExamWindow {
        ExamWindow {
            start_time: "2025-08-30T21:30:00Z".parse().unwrap(),
            duration_minutes: 10,
            max_tab_switches: 5,
        }
    }

    #[test]
    fn unavailable_strictly_before_start() {
        let w = window();
        let just_before = w.start_time - Duration::seconds(1);
        assert!(!w.is_available(just_before));
    }

    #[test]
    fn available_at_and_after_start() {
        let w = window();
        assert!(w.is_available(w.start_time));
        assert!(w.is_available(w.start_time + Duration::hours(3)));
    }

    #[test]
    fn end_time_is_start_plus_duration() {
        let w = window();
        assert_eq!(w.end_time(), w.start_time + Duration::minutes(10));
    }
}
