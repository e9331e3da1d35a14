use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in-progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "overdue" => Some(TaskStatus::Overdue),
            _ => None,
        }
    }

    /// Lenient CLI parsing: case-insensitive, `_`/space accepted for `-`.
    pub fn from_code(code: &str) -> Option<Self> {
        let norm = code.trim().to_lowercase().replace(['_', ' '], "-");
        match norm.as_str() {
            "inprogress" | "in-progress" | "progress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Completed),
            other => Self::from_db_str(other),
        }
    }

    /// Tasks an employee may still pick up.
    pub fn is_open(&self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::Overdue)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_codes_are_lenient() {
        assert_eq!(TaskStatus::from_code("In_Progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_code("done"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_code("OVERDUE"), Some(TaskStatus::Overdue));
        assert_eq!(TaskStatus::from_code("archived"), None);
    }

    #[test]
    fn db_strings_are_strict() {
        for s in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_db_str(s.to_db_str()), Some(s));
        }
        assert_eq!(TaskStatus::from_db_str("Pending"), None);
    }
}
