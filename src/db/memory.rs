use crate::db::repository::{TaskStore, TimeRecordStore};
use crate::errors::{AppError, AppResult};
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use crate::models::time_record::TimeRecord;
use std::collections::BTreeMap;

/// In-process store with SQLite-like id assignment (1, 2, 3, ...).
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: BTreeMap<i64, Task>,
    records: BTreeMap<i64, TimeRecord>,
    next_task: i64,
    next_record: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> impl Iterator<Item = &TimeRecord> {
        self.records.values()
    }
}

impl TaskStore for MemoryStore {
    fn get_task(&self, id: i64) -> AppResult<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn insert_task(&mut self, task: &Task) -> AppResult<i64> {
        self.next_task += 1;
        let id = self.next_task;
        self.tasks.insert(id, Task { id, ..task.clone() });
        Ok(id)
    }

    fn set_task_status(&mut self, id: i64, status: TaskStatus) -> AppResult<()> {
        let task = self.tasks.get_mut(&id).ok_or(AppError::TaskNotFound(id))?;
        task.status = status;
        Ok(())
    }

    fn tasks_for(&self, employee: &str) -> AppResult<Vec<Task>> {
        Ok(self
            .tasks
            .values()
            .filter(|t| t.assignee == employee)
            .cloned()
            .collect())
    }
}

impl TimeRecordStore for MemoryStore {
    fn get_record(&self, id: i64) -> AppResult<Option<TimeRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn insert_record(&mut self, rec: &TimeRecord) -> AppResult<i64> {
        self.next_record += 1;
        let id = self.next_record;
        self.records.insert(id, TimeRecord { id, ..rec.clone() });
        Ok(id)
    }

    fn update_record(&mut self, rec: &TimeRecord) -> AppResult<()> {
        match self.records.get_mut(&rec.id) {
            Some(slot) => {
                *slot = rec.clone();
                Ok(())
            }
            None => Err(AppError::RecordNotFound(rec.id)),
        }
    }

    fn open_records(&self, employee: &str) -> AppResult<Vec<TimeRecord>> {
        Ok(self
            .records
            .values()
            .filter(|r| r.employee == employee && r.is_open())
            .cloned()
            .collect())
    }
}
