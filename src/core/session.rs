//! Session controller: moves time records through
//! `not-started → working → paused ⇄ working → finished` and keeps the
//! linked task's status in step.
//!
//! The controller only talks to the storage traits. With the SQLite backend
//! the caller runs each operation inside one transaction, so the record write
//! and the task write commit (or roll back) together.

use crate::core::calculator::duration;
use crate::db::repository::{TaskStore, TimeRecordStore};
use crate::errors::{AppError, AppResult};
use crate::models::context::Context;
use crate::models::record_status::RecordStatus;
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use crate::models::time_record::TimeRecord;
use chrono::{DateTime, Local};

/// How a command points at the record it acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSelector {
    Id(i64),
    Task(i64),
    /// The employee's only open record.
    Only,
}

impl RecordSelector {
    pub fn from_args(record: Option<i64>, task: Option<i64>) -> Self {
        match (record, task) {
            (Some(id), _) => RecordSelector::Id(id),
            (None, Some(task)) => RecordSelector::Task(task),
            (None, None) => RecordSelector::Only,
        }
    }
}

/// What an employee can pick up, and what they are on right now.
#[derive(Debug, Default)]
pub struct Board {
    pub available: Vec<Task>,
    pub active: Vec<(TimeRecord, Option<Task>)>,
}

pub struct SessionController<S> {
    store: S,
    single_active: bool,
}

fn invalid(rec: &TimeRecord, action: &str) -> AppError {
    AppError::InvalidTransition {
        from: rec.status.to_string(),
        action: action.to_string(),
    }
}

impl<S: TaskStore + TimeRecordStore> SessionController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            single_active: false,
        }
    }

    /// Allow at most one working/paused record per employee.
    pub fn single_active_session(mut self, on: bool) -> Self {
        self.single_active = on;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn ensure_no_other_session(&self, employee: &str, open: &[TimeRecord]) -> AppResult<()> {
        if self.single_active
            && let Some(rec) = open.first()
        {
            return Err(AppError::SessionInProgress(employee.to_string(), rec.id));
        }
        Ok(())
    }

    /// Accept a task: open a working record for it and flip it to in-progress.
    pub fn accept(
        &mut self,
        ctx: &Context,
        task_id: i64,
        now: DateTime<Local>,
    ) -> AppResult<TimeRecord> {
        let employee = ctx.employee();

        let task = self
            .store
            .get_task(task_id)?
            .ok_or(AppError::TaskNotFound(task_id))?;

        if task.assignee != employee {
            return Err(AppError::NotAssigned(task_id, employee.to_string()));
        }

        let open = self.store.open_records(employee)?;
        if let Some(rec) = open.iter().find(|r| r.task_id == Some(task_id)) {
            return Err(AppError::AlreadyActive {
                task: task_id,
                record: rec.id,
            });
        }

        if !task.status.is_open() {
            return Err(AppError::TaskNotAvailable(task_id, task.status.to_string()));
        }

        self.ensure_no_other_session(employee, &open)?;

        let mut rec = TimeRecord::started(employee, Some(task_id), now);
        rec.id = self.store.insert_record(&rec)?;
        self.store.set_task_status(task_id, TaskStatus::InProgress)?;

        Ok(rec)
    }

    /// Start a plain work-day session with no task attached.
    pub fn start_day(&mut self, ctx: &Context, now: DateTime<Local>) -> AppResult<TimeRecord> {
        let employee = ctx.employee();
        let open = self.store.open_records(employee)?;

        if let Some(rec) = open.iter().find(|r| r.task_id.is_none()) {
            return Err(AppError::SessionInProgress(employee.to_string(), rec.id));
        }
        self.ensure_no_other_session(employee, &open)?;

        let mut rec = TimeRecord::started(employee, None, now);
        rec.id = self.store.insert_record(&rec)?;
        Ok(rec)
    }

    pub fn pause(
        &mut self,
        ctx: &Context,
        selector: RecordSelector,
        now: DateTime<Local>,
    ) -> AppResult<TimeRecord> {
        let mut rec = self.resolve(ctx, selector)?;
        if rec.status != RecordStatus::Working {
            return Err(invalid(&rec, "pause"));
        }

        rec.status = RecordStatus::Paused;
        rec.pause_started_at = Some(now);
        self.store.update_record(&rec)?;
        Ok(rec)
    }

    pub fn resume(
        &mut self,
        ctx: &Context,
        selector: RecordSelector,
        now: DateTime<Local>,
    ) -> AppResult<TimeRecord> {
        let mut rec = self.resolve(ctx, selector)?;
        if rec.status != RecordStatus::Paused {
            return Err(invalid(&rec, "resume"));
        }

        fold_open_pause(&mut rec, now);
        rec.status = RecordStatus::Working;
        self.store.update_record(&rec)?;
        Ok(rec)
    }

    /// Close the record and complete its task. An open pause is folded in first.
    pub fn finish(
        &mut self,
        ctx: &Context,
        selector: RecordSelector,
        now: DateTime<Local>,
    ) -> AppResult<TimeRecord> {
        let mut rec = self.resolve(ctx, selector)?;
        if !rec.is_open() {
            return Err(invalid(&rec, "finish"));
        }

        if rec.status == RecordStatus::Paused {
            fold_open_pause(&mut rec, now);
        }

        let start = rec.start_time.ok_or_else(|| invalid(&rec, "finish"))?;
        let worked = duration::worked_ms(now, start, rec.pause_duration, None);

        rec.status = RecordStatus::Finished;
        rec.end_time = Some(now);
        rec.total_hours = Some(duration::total_hours(worked));
        self.store.update_record(&rec)?;

        if let Some(task_id) = rec.task_id {
            self.store.set_task_status(task_id, TaskStatus::Completed)?;
        }

        Ok(rec)
    }

    /// Find the record a command refers to, scoped to the acting employee.
    pub fn resolve(&self, ctx: &Context, selector: RecordSelector) -> AppResult<TimeRecord> {
        let employee = ctx.employee();

        match selector {
            RecordSelector::Id(id) => self
                .store
                .get_record(id)?
                .filter(|r| r.employee == employee)
                .ok_or(AppError::RecordNotFound(id)),

            RecordSelector::Task(task_id) => self
                .store
                .open_records(employee)?
                .into_iter()
                .find(|r| r.task_id == Some(task_id))
                .ok_or_else(|| AppError::NoOpenSession(format!("task #{task_id}"))),

            RecordSelector::Only => {
                let mut open = self.store.open_records(employee)?;
                match open.len() {
                    0 => Err(AppError::NoOpenSession(employee.to_string())),
                    1 => Ok(open.remove(0)),
                    _ => Err(AppError::AmbiguousSession {
                        employee: employee.to_string(),
                        ids: open
                            .iter()
                            .map(|r| format!("#{}", r.id))
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    }

    /// Assigned tasks still open for pick-up, and the open sessions.
    pub fn board(&self, ctx: &Context) -> AppResult<Board> {
        let employee = ctx.employee();
        let open = self.store.open_records(employee)?;

        let available = self
            .store
            .tasks_for(employee)?
            .into_iter()
            .filter(|t| t.status.is_open())
            .filter(|t| !open.iter().any(|r| r.task_id == Some(t.id)))
            .collect();

        let mut active = Vec::with_capacity(open.len());
        for rec in open {
            let task = match rec.task_id {
                Some(id) => self.store.get_task(id)?,
                None => None,
            };
            active.push((rec, task));
        }

        Ok(Board { available, active })
    }
}

fn fold_open_pause(rec: &mut TimeRecord, now: DateTime<Local>) {
    if let Some(paused_at) = rec.pause_started_at.take() {
        rec.pause_duration += duration::pause_minutes_between(paused_at, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 9, 1, h, m, 0).unwrap()
    }

    fn setup() -> (SessionController<MemoryStore>, Context, i64) {
        let mut store = MemoryStore::new();
        let task_id = store
            .insert_task(&Task::new("Quarterly report", "alice", at(8, 0)))
            .unwrap();
        (SessionController::new(store), Context::new("alice"), task_id)
    }

    fn task_status(ctl: &SessionController<MemoryStore>, id: i64) -> TaskStatus {
        ctl.store().get_task(id).unwrap().unwrap().status
    }

    #[test]
    fn full_day_with_one_pause() {
        let (mut ctl, ctx, task) = setup();

        let rec = ctl.accept(&ctx, task, at(9, 0)).unwrap();
        assert_eq!(rec.status, RecordStatus::Working);
        assert_eq!(rec.created_at, at(9, 0).to_rfc3339());
        assert_eq!(task_status(&ctl, task), TaskStatus::InProgress);

        ctl.pause(&ctx, RecordSelector::Only, at(9, 30)).unwrap();
        let resumed = ctl.resume(&ctx, RecordSelector::Only, at(10, 0)).unwrap();
        assert_eq!(resumed.pause_duration, 30);
        assert_eq!(resumed.pause_started_at, None);

        let done = ctl.finish(&ctx, RecordSelector::Task(task), at(11, 0)).unwrap();
        assert_eq!(done.status, RecordStatus::Finished);
        assert_eq!(done.end_time, Some(at(11, 0)));
        assert_eq!(done.total_hours, Some(1.5));
        assert_eq!(done.worked_ms(at(23, 0)), 90 * 60_000);
        assert_eq!(task_status(&ctl, task), TaskStatus::Completed);
    }

    #[test]
    fn resume_adds_whole_pause_minutes() {
        let (mut ctl, ctx, task) = setup();
        let rec = ctl.accept(&ctx, task, at(9, 0)).unwrap();

        ctl.pause(&ctx, RecordSelector::Id(rec.id), at(9, 10)).unwrap();
        let paused_at = at(9, 10);
        let resume_at = paused_at + chrono::Duration::seconds(7 * 60 + 59);
        let r = ctl.resume(&ctx, RecordSelector::Id(rec.id), resume_at).unwrap();
        assert_eq!(r.pause_duration, 7);

        ctl.pause(&ctx, RecordSelector::Id(rec.id), at(10, 0)).unwrap();
        let r = ctl.resume(&ctx, RecordSelector::Id(rec.id), at(10, 20)).unwrap();
        assert_eq!(r.pause_duration, 27);
    }

    #[test]
    fn finishing_while_paused_folds_the_pause() {
        let (mut ctl, ctx, task) = setup();
        ctl.accept(&ctx, task, at(9, 0)).unwrap();
        ctl.pause(&ctx, RecordSelector::Only, at(10, 0)).unwrap();

        let done = ctl.finish(&ctx, RecordSelector::Only, at(10, 45)).unwrap();
        assert_eq!(done.pause_duration, 45);
        assert_eq!(done.pause_started_at, None);
        assert_eq!(done.total_hours, Some(1.0));
    }

    #[test]
    fn accept_moves_task_from_available_to_active_once() {
        let (mut ctl, ctx, task) = setup();

        let before = ctl.board(&ctx).unwrap();
        assert_eq!(before.available.len(), 1);
        assert!(before.active.is_empty());

        let rec = ctl.accept(&ctx, task, at(9, 0)).unwrap();
        let after = ctl.board(&ctx).unwrap();
        assert!(after.available.is_empty());
        assert_eq!(after.active.len(), 1);
        assert_eq!(after.active[0].0.id, rec.id);
        assert_eq!(after.active[0].1.as_ref().map(|t| t.id), Some(task));

        let again = ctl.accept(&ctx, task, at(9, 1));
        assert!(matches!(again, Err(AppError::AlreadyActive { .. })));
        assert_eq!(ctl.store().records().count(), 1);
    }

    #[test]
    fn illegal_transitions_write_nothing() {
        let (mut ctl, ctx, task) = setup();
        let rec = ctl.accept(&ctx, task, at(9, 0)).unwrap();

        let err = ctl.resume(&ctx, RecordSelector::Only, at(9, 5)).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
        assert_eq!(err.to_string(), "Cannot resume a session that is working");

        ctl.finish(&ctx, RecordSelector::Only, at(10, 0)).unwrap();
        for result in [
            ctl.pause(&ctx, RecordSelector::Id(rec.id), at(10, 5)),
            ctl.resume(&ctx, RecordSelector::Id(rec.id), at(10, 5)),
            ctl.finish(&ctx, RecordSelector::Id(rec.id), at(10, 5)),
        ] {
            assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
        }

        let stored = ctl.store().get_record(rec.id).unwrap().unwrap();
        assert_eq!(stored.end_time, Some(at(10, 0)));
        assert_eq!(stored.total_hours, Some(1.0));
    }

    #[test]
    fn finished_tasks_cannot_be_accepted_again() {
        let (mut ctl, ctx, task) = setup();
        ctl.accept(&ctx, task, at(9, 0)).unwrap();
        ctl.finish(&ctx, RecordSelector::Only, at(9, 30)).unwrap();

        let err = ctl.accept(&ctx, task, at(10, 0)).unwrap_err();
        assert!(matches!(err, AppError::TaskNotAvailable(_, _)));
    }

    #[test]
    fn tasks_of_others_are_rejected() {
        let (mut ctl, _, task) = setup();
        let bob = Context::new("bob");
        assert!(matches!(
            ctl.accept(&bob, task, at(9, 0)),
            Err(AppError::NotAssigned(_, _))
        ));

        // Acting on behalf of alice is fine.
        let admin = Context::new("bob").acting_as("alice");
        let rec = ctl.accept(&admin, task, at(9, 0)).unwrap();
        assert_eq!(rec.employee, "alice");

        // Records are scoped to their owner.
        assert!(matches!(
            ctl.pause(&bob, RecordSelector::Id(rec.id), at(9, 30)),
            Err(AppError::RecordNotFound(_))
        ));
    }

    #[test]
    fn implicit_selection_needs_exactly_one_open_record() {
        let (mut ctl, ctx, task) = setup();
        assert!(matches!(
            ctl.pause(&ctx, RecordSelector::Only, at(9, 0)),
            Err(AppError::NoOpenSession(_))
        ));

        ctl.accept(&ctx, task, at(9, 0)).unwrap();
        ctl.start_day(&ctx, at(9, 0)).unwrap();

        assert!(matches!(
            ctl.pause(&ctx, RecordSelector::Only, at(9, 30)),
            Err(AppError::AmbiguousSession { .. })
        ));
        assert!(ctl.pause(&ctx, RecordSelector::Task(task), at(9, 30)).is_ok());
    }

    #[test]
    fn single_active_mode_blocks_a_second_session() {
        let (ctl, ctx, task) = setup();
        let mut ctl = ctl.single_active_session(true);
        let other = ctl
            .store_mut()
            .insert_task(&Task::new("Code review", "alice", at(8, 0)))
            .unwrap();

        ctl.accept(&ctx, task, at(9, 0)).unwrap();
        assert!(matches!(
            ctl.accept(&ctx, other, at(9, 5)),
            Err(AppError::SessionInProgress(_, _))
        ));
        assert!(matches!(
            ctl.start_day(&ctx, at(9, 5)),
            Err(AppError::SessionInProgress(_, _))
        ));

        ctl.finish(&ctx, RecordSelector::Only, at(10, 0)).unwrap();
        assert!(ctl.accept(&ctx, other, at(10, 5)).is_ok());
    }

    #[test]
    fn day_session_has_no_task_side_effects() {
        let (mut ctl, ctx, task) = setup();
        let rec = ctl.start_day(&ctx, at(8, 0)).unwrap();
        assert_eq!(rec.task_id, None);
        assert!(ctl.start_day(&ctx, at(8, 1)).is_err());

        let done = ctl.finish(&ctx, RecordSelector::Id(rec.id), at(12, 0)).unwrap();
        assert_eq!(done.total_hours, Some(4.0));
        assert_eq!(task_status(&ctl, task), TaskStatus::Pending);
    }
}
