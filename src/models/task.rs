use super::task_status::TaskStatus;
use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Task {
    pub id: i64,                        // ⇔ tasks.id (0 until inserted)
    pub title: String,                  // ⇔ tasks.title
    pub description: String,            // ⇔ tasks.description (default '')
    pub assignee: String,               // ⇔ tasks.assignee (employee id)
    pub project: Option<String>,        // ⇔ tasks.project
    pub due_date: Option<NaiveDate>,    // ⇔ tasks.due_date (TEXT "YYYY-MM-DD")
    pub estimate_minutes: Option<i64>,  // ⇔ tasks.estimate_minutes
    pub daily: bool,                    // ⇔ tasks.daily (0/1)
    pub status: TaskStatus,             // ⇔ tasks.status
    pub created_at: String,             // ⇔ tasks.created_at (ISO8601)
}

impl Task {
    /// New pending task created at `now`, not yet persisted.
    pub fn new(title: &str, assignee: &str, now: DateTime<Local>) -> Self {
        Self {
            id: 0,
            title: title.trim().to_string(),
            description: String::new(),
            assignee: assignee.to_string(),
            project: None,
            due_date: None,
            estimate_minutes: None,
            daily: false,
            status: TaskStatus::Pending,
            created_at: now.to_rfc3339(),
        }
    }

    pub fn due_str(&self) -> String {
        self.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    /// Past due and still open or in progress.
    pub fn is_late(&self, today: NaiveDate) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::InProgress)
            && self.due_date.is_some_and(|d| d < today)
    }

    /// Copy of a recurring task for another day.
    pub fn duplicate_for(&self, date: NaiveDate, now: DateTime<Local>) -> Self {
        Self {
            id: 0,
            due_date: Some(date),
            status: TaskStatus::Pending,
            created_at: now.to_rfc3339(),
            ..self.clone()
        }
    }
}
