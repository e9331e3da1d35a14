use crate::db::repository::{TaskStore, TimeRecordStore};
use crate::db::{records, tasks};
use crate::errors::AppResult;
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use crate::models::time_record::TimeRecord;
use rusqlite::Connection;

/// Repository view over a borrowed connection (or an open transaction,
/// which derefs to one).
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl TaskStore for SqliteStore<'_> {
    fn get_task(&self, id: i64) -> AppResult<Option<Task>> {
        tasks::load_task(self.conn, id)
    }

    fn insert_task(&mut self, task: &Task) -> AppResult<i64> {
        tasks::insert_task(self.conn, task)
    }

    fn set_task_status(&mut self, id: i64, status: TaskStatus) -> AppResult<()> {
        tasks::update_task_status(self.conn, id, status)
    }

    fn tasks_for(&self, employee: &str) -> AppResult<Vec<Task>> {
        tasks::list_tasks(self.conn, Some(employee), None)
    }
}

impl TimeRecordStore for SqliteStore<'_> {
    fn get_record(&self, id: i64) -> AppResult<Option<TimeRecord>> {
        records::load_record(self.conn, id)
    }

    fn insert_record(&mut self, rec: &TimeRecord) -> AppResult<i64> {
        records::insert_record(self.conn, rec)
    }

    fn update_record(&mut self, rec: &TimeRecord) -> AppResult<()> {
        records::update_record(self.conn, rec)
    }

    fn open_records(&self, employee: &str) -> AppResult<Vec<TimeRecord>> {
        records::load_open_records(self.conn, employee)
    }
}
