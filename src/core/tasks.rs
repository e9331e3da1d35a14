use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::tasks::{self, OverdueStats};
use crate::errors::{AppError, AppResult};
use crate::models::context::Context;
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use chrono::{Local, NaiveDate};

/// Input for `task add`.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub project: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub estimate_minutes: Option<i64>,
    pub daily: bool,
}

/// High-level task lifecycle operations over the SQLite store.
pub struct TaskLogic;

impl TaskLogic {
    /// Create a task; unassigned tasks go to the acting employee.
    pub fn add(pool: &mut DbPool, ctx: &Context, input: NewTask) -> AppResult<Task> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("task title cannot be empty".into()));
        }
        if input.estimate_minutes.is_some_and(|m| m <= 0) {
            return Err(AppError::InvalidTime(
                "Estimate must be a positive number of minutes".into(),
            ));
        }

        let assignee = input
            .assignee
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| ctx.employee().to_string());

        let mut task = Task::new(title, &assignee, Local::now());
        task.description = input.description.unwrap_or_default();
        task.project = input.project.filter(|p| !p.trim().is_empty());
        task.due_date = input.due_date;
        task.estimate_minutes = input.estimate_minutes;
        task.daily = input.daily;

        task.id = tasks::insert_task(&pool.conn, &task)?;

        ttlog_quiet(
            &pool.conn,
            "task_add",
            &format!("#{}", task.id),
            &format!("{} created '{}' for {}", ctx.label(), task.title, task.assignee),
        );

        Ok(task)
    }

    pub fn list(
        pool: &mut DbPool,
        assignee: Option<&str>,
        status: Option<TaskStatus>,
    ) -> AppResult<Vec<Task>> {
        tasks::list_tasks(&pool.conn, assignee, status)
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<Task> {
        tasks::load_task(&pool.conn, id)?.ok_or(AppError::TaskNotFound(id))
    }

    /// Delete a task and its time records in one transaction.
    /// Returns the number of time records removed.
    pub fn delete(pool: &mut DbPool, ctx: &Context, id: i64) -> AppResult<usize> {
        let removed = pool.in_transaction(|conn| tasks::delete_task_cascade(conn, id))?;

        ttlog_quiet(
            &pool.conn,
            "task_del",
            &format!("#{id}"),
            &format!("{} deleted task with {} time record(s)", ctx.label(), removed),
        );

        Ok(removed)
    }

    /// Flag past-due open tasks as overdue.
    pub fn update_overdue(pool: &mut DbPool, today: NaiveDate) -> AppResult<usize> {
        let changed = tasks::update_overdue_tasks(&pool.conn, today)?;

        if changed > 0 {
            ttlog_quiet(
                &pool.conn,
                "overdue",
                &today.to_string(),
                &format!("{} task(s) marked overdue", changed),
            );
        }
        Ok(changed)
    }

    pub fn overdue_stats(pool: &mut DbPool, today: NaiveDate) -> AppResult<OverdueStats> {
        tasks::overdue_stats(&pool.conn, today)
    }

    /// Copy yesterday's recurring tasks onto `date`.
    pub fn duplicate_daily(pool: &mut DbPool, date: NaiveDate) -> AppResult<Vec<i64>> {
        let created = pool.in_transaction(|conn| tasks::duplicate_daily_tasks(conn, date, Local::now()))?;

        if !created.is_empty() {
            ttlog_quiet(
                &pool.conn,
                "duplicate_daily",
                &date.to_string(),
                &format!("{} daily task(s) created", created.len()),
            );
        }
        Ok(created)
    }
}
