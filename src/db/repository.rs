//! Narrow storage interfaces used by the session logic.
//!
//! `SqliteStore` is the production backend; `MemoryStore` keeps rows in
//! process so the controller can be exercised without a database file.

use crate::errors::AppResult;
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use crate::models::time_record::TimeRecord;

pub trait TaskStore {
    fn get_task(&self, id: i64) -> AppResult<Option<Task>>;
    fn insert_task(&mut self, task: &Task) -> AppResult<i64>;
    fn set_task_status(&mut self, id: i64, status: TaskStatus) -> AppResult<()>;
    /// Every task assigned to `employee`.
    fn tasks_for(&self, employee: &str) -> AppResult<Vec<Task>>;
}

pub trait TimeRecordStore {
    fn get_record(&self, id: i64) -> AppResult<Option<TimeRecord>>;
    fn insert_record(&mut self, rec: &TimeRecord) -> AppResult<i64>;
    /// Full-row write of an existing record.
    fn update_record(&mut self, rec: &TimeRecord) -> AppResult<()>;
    /// Working or paused records of `employee`.
    fn open_records(&self, employee: &str) -> AppResult<Vec<TimeRecord>>;
}
