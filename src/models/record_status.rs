use serde::Serialize;
use std::fmt;

/// Lifecycle of a time record: `not-started → working → paused ⇄ working → finished`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RecordStatus {
    NotStarted,
    Working,
    Paused,
    Finished,
}

impl RecordStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RecordStatus::NotStarted => "not-started",
            RecordStatus::Working => "working",
            RecordStatus::Paused => "paused",
            RecordStatus::Finished => "finished",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "not-started" => Some(RecordStatus::NotStarted),
            "working" => Some(RecordStatus::Working),
            "paused" => Some(RecordStatus::Paused),
            "finished" => Some(RecordStatus::Finished),
            _ => None,
        }
    }

    /// Working or paused.
    pub fn is_open(&self) -> bool {
        matches!(self, RecordStatus::Working | RecordStatus::Paused)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
