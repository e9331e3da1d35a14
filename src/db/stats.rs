use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let tasks: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
    let records: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM time_records", [], |row| row.get(0))?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM time_records WHERE status IN ('working', 'paused')",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Tasks:{} {}{}{}", CYAN, RESET, GREEN, tasks, RESET);
    println!(
        "{}• Time records:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, records, RESET, open
    );

    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM time_records", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM time_records", [], |row| row.get(0))
        .optional()?
        .flatten();

    let dash = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first_date.unwrap_or_else(dash));
    println!("    to:   {}", last_date.unwrap_or_else(dash));

    let hours: Option<f64> = pool.conn.query_row(
        "SELECT SUM(total_hours) FROM time_records WHERE status = 'finished'",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Hours logged:{} {:.2}",
        CYAN,
        RESET,
        hours.unwrap_or(0.0)
    );

    println!();
    Ok(())
}
