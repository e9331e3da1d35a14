//! SQL access for the `tasks` table.

use crate::errors::{AppError, AppResult};
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::BTreeMap;

const TASK_COLUMNS: &str = "id, title, description, assignee, project, due_date, \
                            estimate_minutes, daily, status, created_at";

pub fn map_task(row: &Row) -> Result<Task> {
    let status_str: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTaskStatus(status_str.clone())),
        )
    })?;

    let due_str: Option<String> = row.get("due_date")?;
    let due_date = match due_str {
        Some(s) => Some(NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s.clone())),
            )
        })?),
        None => None,
    };

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        assignee: row.get("assignee")?,
        project: row.get("project")?,
        due_date,
        estimate_minutes: row.get("estimate_minutes")?,
        daily: row.get::<_, i32>("daily")? == 1,
        status,
        created_at: row.get("created_at")?,
    })
}

fn date_param(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn insert_task(conn: &Connection, task: &Task) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (title, description, assignee, project, due_date,
                            estimate_minutes, daily, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            task.title,
            task.description,
            task.assignee,
            task.project,
            date_param(task.due_date),
            task.estimate_minutes,
            if task.daily { 1 } else { 0 },
            task.status.to_db_str(),
            task.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_task(conn: &Connection, id: i64) -> AppResult<Option<Task>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
    let task = conn.query_row(&sql, [id], map_task).optional()?;
    Ok(task)
}

pub fn update_task_status(conn: &Connection, id: i64, status: TaskStatus) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE tasks SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id],
    )?;
    if changed == 0 {
        return Err(AppError::TaskNotFound(id));
    }
    Ok(())
}

/// Tasks filtered by assignee and/or status, ordered by due date (undated last).
pub fn list_tasks(
    conn: &Connection,
    assignee: Option<&str>,
    status: Option<TaskStatus>,
) -> AppResult<Vec<Task>> {
    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE (?1 IS NULL OR assignee = ?1)
           AND (?2 IS NULL OR status = ?2)
         ORDER BY due_date IS NULL, due_date ASC, id ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![assignee, status.map(|s| s.to_db_str())],
        map_task,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete a task together with its time records. The caller wraps this in a
/// transaction; returns the number of records removed.
pub fn delete_task_cascade(conn: &Connection, id: i64) -> AppResult<usize> {
    if load_task(conn, id)?.is_none() {
        return Err(AppError::TaskNotFound(id));
    }

    let records = conn.execute("DELETE FROM time_records WHERE task_id = ?1", [id])?;
    conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(records)
}

/// Mark past-due pending/in-progress tasks as overdue. Returns how many changed.
pub fn update_overdue_tasks(conn: &Connection, today: NaiveDate) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE tasks SET status = 'overdue'
         WHERE due_date IS NOT NULL
           AND due_date < ?1
           AND status IN ('pending', 'in-progress')",
        [today.format("%Y-%m-%d").to_string()],
    )?;
    Ok(changed)
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct OverdueStats {
    pub by_status: BTreeMap<String, i64>,
    pub overdue_by_assignee: BTreeMap<String, i64>,
    /// Still pending/in-progress but past due as of the reference day.
    pub late_not_flagged: i64,
}

impl OverdueStats {
    pub fn count(&self, status: TaskStatus) -> i64 {
        self.by_status
            .get(status.to_db_str())
            .copied()
            .unwrap_or(0)
    }
}

pub fn overdue_stats(conn: &Connection, today: NaiveDate) -> AppResult<OverdueStats> {
    let mut stats = OverdueStats::default();

    {
        let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM tasks GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for r in rows {
            let (status, n) = r?;
            stats.by_status.insert(status, n);
        }
    }

    {
        let mut stmt = conn.prepare(
            "SELECT assignee, COUNT(*) FROM tasks
             WHERE status = 'overdue'
             GROUP BY assignee ORDER BY assignee",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for r in rows {
            let (who, n) = r?;
            stats.overdue_by_assignee.insert(who, n);
        }
    }

    stats.late_not_flagged = conn.query_row(
        "SELECT COUNT(*) FROM tasks
         WHERE due_date IS NOT NULL AND due_date < ?1
           AND status IN ('pending', 'in-progress')",
        [today.format("%Y-%m-%d").to_string()],
        |row| row.get(0),
    )?;

    Ok(stats)
}

/// Copy recurring tasks dated the day before `date` onto `date`, skipping
/// those whose title/assignee already exist there. Returns the new ids.
pub fn duplicate_daily_tasks(
    conn: &Connection,
    date: NaiveDate,
    now: DateTime<Local>,
) -> AppResult<Vec<i64>> {
    let Some(previous) = date.pred_opt() else {
        return Ok(Vec::new());
    };

    let sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE daily = 1 AND due_date = ?1
         ORDER BY id ASC"
    );
    let templates: Vec<Task> = {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([previous.format("%Y-%m-%d").to_string()], map_task)?;
        let mut v = Vec::new();
        for r in rows {
            v.push(r?);
        }
        v
    };

    let target = date.format("%Y-%m-%d").to_string();
    let mut created = Vec::new();

    for t in templates {
        let exists: bool = conn
            .prepare_cached(
                "SELECT 1 FROM tasks WHERE due_date = ?1 AND title = ?2 AND assignee = ?3 LIMIT 1",
            )?
            .exists(params![target, t.title, t.assignee])?;

        if exists {
            continue;
        }

        created.push(insert_task(conn, &t.duplicate_for(date, now))?);
    }

    Ok(created)
}
