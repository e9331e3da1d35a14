use crate::models::task::Task;
use crate::models::time_record::TimeRecord;
use serde::Serialize;

/// Flat row for CSV / JSON export of time records.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub id: i64,
    pub employee: String,
    pub date: String,
    pub task_id: Option<i64>,
    pub task_title: String,
    pub status: String,
    pub start_time: String,
    pub end_time: String,
    pub pause_minutes: i64,
    pub worked_minutes: i64,
    pub total_hours: Option<f64>,
}

impl RecordExport {
    /// `now` only matters for records still open: their worked time is a
    /// snapshot at export time.
    pub fn from_record(
        rec: &TimeRecord,
        task: Option<&Task>,
        now: chrono::DateTime<chrono::Local>,
    ) -> Self {
        let fmt = |t: Option<chrono::DateTime<chrono::Local>>| {
            t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default()
        };

        Self {
            id: rec.id,
            employee: rec.employee.clone(),
            date: rec.date.format("%Y-%m-%d").to_string(),
            task_id: rec.task_id,
            task_title: task.map(|t| t.title.clone()).unwrap_or_default(),
            status: rec.status.to_string(),
            start_time: fmt(rec.start_time),
            end_time: fmt(rec.end_time),
            pause_minutes: rec.pause_duration,
            worked_minutes: crate::core::calculator::duration::worked_minutes(rec.worked_ms(now)),
            total_hours: rec.total_hours,
        }
    }
}
