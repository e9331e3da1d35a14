use super::record_status::RecordStatus;
use crate::core::calculator::duration;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

/// One work session of an employee on a given date, optionally tied to a task.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeRecord {
    pub id: i64,
    pub employee: String,
    pub task_id: Option<i64>,
    pub date: NaiveDate,
    pub status: RecordStatus,
    pub start_time: Option<DateTime<Local>>,
    /// Cumulative paused minutes, folded in on every resume.
    pub pause_duration: i64,
    pub pause_started_at: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub total_hours: Option<f64>,
    pub created_at: String,
}

impl TimeRecord {
    /// A record that starts working at `now`.
    pub fn started(employee: &str, task_id: Option<i64>, now: DateTime<Local>) -> Self {
        Self {
            id: 0,
            employee: employee.to_string(),
            task_id,
            date: now.date_naive(),
            status: RecordStatus::Working,
            start_time: Some(now),
            pause_duration: 0,
            pause_started_at: None,
            end_time: None,
            total_hours: None,
            created_at: now.to_rfc3339(),
        }
    }

    /// Worked milliseconds as of `now` (or as of `end_time` once finished).
    pub fn worked_ms(&self, now: DateTime<Local>) -> i64 {
        let Some(start) = self.start_time else {
            return 0;
        };

        let at = match (self.status, self.end_time) {
            (RecordStatus::Finished, Some(end)) => end,
            _ => now,
        };

        let open_pause = match self.status {
            RecordStatus::Paused => self.pause_started_at,
            _ => None,
        };

        duration::worked_ms(at, start, self.pause_duration, open_pause)
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn task_label(&self) -> String {
        match self.task_id {
            Some(id) => format!("#{id}"),
            None => "(day)".to_string(),
        }
    }
}
