//! SQL access for the `time_records` table.

use crate::errors::{AppError, AppResult};
use crate::models::record_status::RecordStatus;
use crate::models::time_record::TimeRecord;
use crate::utils::time::{from_db, to_db};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const RECORD_COLUMNS: &str = "id, employee, task_id, date, status, start_time, pause_duration, \
                              pause_started_at, end_time, total_hours, created_at";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn get_timestamp(
    row: &Row,
    column: &str,
) -> Result<Option<chrono::DateTime<chrono::Local>>> {
    match row.get::<_, Option<String>>(column)? {
        Some(s) => from_db(&s)
            .map(Some)
            .ok_or_else(|| conversion_error(AppError::InvalidTime(s))),
        None => Ok(None),
    }
}

pub fn map_record(row: &Row) -> Result<TimeRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = RecordStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(AppError::InvalidRecordStatus(status_str.clone())))?;

    Ok(TimeRecord {
        id: row.get("id")?,
        employee: row.get("employee")?,
        task_id: row.get("task_id")?,
        date,
        status,
        start_time: get_timestamp(row, "start_time")?,
        pause_duration: row.get("pause_duration")?,
        pause_started_at: get_timestamp(row, "pause_started_at")?,
        end_time: get_timestamp(row, "end_time")?,
        total_hours: row.get("total_hours")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_record(conn: &Connection, rec: &TimeRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_records (employee, task_id, date, status, start_time, pause_duration,
                                   pause_started_at, end_time, total_hours, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            rec.employee,
            rec.task_id,
            rec.date.format("%Y-%m-%d").to_string(),
            rec.status.to_db_str(),
            rec.start_time.as_ref().map(to_db),
            rec.pause_duration,
            rec.pause_started_at.as_ref().map(to_db),
            rec.end_time.as_ref().map(to_db),
            rec.total_hours,
            rec.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a record (all fields except id). Full-row write.
pub fn update_record(conn: &Connection, rec: &TimeRecord) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE time_records
         SET employee = ?1, task_id = ?2, date = ?3, status = ?4,
             start_time = ?5, pause_duration = ?6, pause_started_at = ?7,
             end_time = ?8, total_hours = ?9, created_at = ?10
         WHERE id = ?11",
        params![
            rec.employee,
            rec.task_id,
            rec.date.format("%Y-%m-%d").to_string(),
            rec.status.to_db_str(),
            rec.start_time.as_ref().map(to_db),
            rec.pause_duration,
            rec.pause_started_at.as_ref().map(to_db),
            rec.end_time.as_ref().map(to_db),
            rec.total_hours,
            rec.created_at,
            rec.id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::RecordNotFound(rec.id));
    }
    Ok(())
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<Option<TimeRecord>> {
    let sql = format!("SELECT {RECORD_COLUMNS} FROM time_records WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_record).optional()?)
}

fn query_records<P: rusqlite::Params>(
    conn: &Connection,
    where_clause: &str,
    params: P,
) -> AppResult<Vec<TimeRecord>> {
    let sql = format!(
        "SELECT {RECORD_COLUMNS} FROM time_records {where_clause} ORDER BY date ASC, start_time ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, map_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Working or paused records of an employee.
pub fn load_open_records(conn: &Connection, employee: &str) -> AppResult<Vec<TimeRecord>> {
    query_records(
        conn,
        "WHERE employee = ?1 AND status IN ('working', 'paused')",
        [employee],
    )
}

pub fn load_records_by_date(
    conn: &Connection,
    employee: &str,
    date: &NaiveDate,
) -> AppResult<Vec<TimeRecord>> {
    query_records(
        conn,
        "WHERE employee = ?1 AND date = ?2",
        params![employee, date.format("%Y-%m-%d").to_string()],
    )
}

pub fn load_records_for_task(conn: &Connection, task_id: i64) -> AppResult<Vec<TimeRecord>> {
    query_records(conn, "WHERE task_id = ?1", [task_id])
}

/// Every record, optionally bounded by date (inclusive).
pub fn load_records_between(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TimeRecord>> {
    match bounds {
        None => query_records(conn, "", params![]),
        Some((start, end)) => query_records(
            conn,
            "WHERE date BETWEEN ?1 AND ?2",
            params![
                start.format("%Y-%m-%d").to_string(),
                end.format("%Y-%m-%d").to_string()
            ],
        ),
    }
}
