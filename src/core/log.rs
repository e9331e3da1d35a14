use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const OP_WIDTH_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// Colour of the operation column.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "accept" | "start" | "task_add" => Colour::Green,
        "finish" => Colour::Cyan,
        "pause" | "resume" => Colour::Yellow,
        "task_del" => Colour::Red,
        "overdue" => Colour::RGB(255, 153, 51),
        "duplicate_daily" | "export" => Colour::Blue,
        "backup" | "init" => Colour::White,
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Rows of the internal log, oldest first. `operation` filters by exact
    /// name; `limit` keeps only the newest N rows.
    pub fn load(
        pool: &mut DbPool,
        operation: Option<&str>,
        limit: Option<usize>,
    ) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, IFNULL(target, ''), message FROM log
             WHERE (?1 IS NULL OR operation = ?1)
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([operation], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if let Some(n) = limit
            && entries.len() > n
        {
            entries.drain(..entries.len() - n);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &mut DbPool, operation: Option<&str>, limit: Option<usize>) -> AppResult<()> {
        let entries = Self::load(pool, operation, limit)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();

        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.len())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for ((entry, date), op_target) in entries.iter().zip(&dates).zip(&op_targets) {
            let color = color_for_operation(&entry.operation);

            let visible = if op_target.chars().count() > OP_WIDTH_MAX {
                let mut s: String = op_target.chars().take(OP_WIDTH_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target.clone()
            };

            // Only the operation word is coloured.
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                date,
                colored,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
