use crate::db::pool::DbPool;
use crate::db::{records, tasks};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::range::parse_range;
use crate::ui::messages::warning;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export time records.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"`, or a period accepted by `--range`
    ///   (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `start:end`)
    ///
    /// Returns the number of rows written.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let rows = Self::collect(pool, bounds)?;

        if rows.is_empty() {
            warning("No time records found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        crate::db::log::ttlog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} record(s) exported as {}", rows.len(), format.as_str()),
        );

        Ok(rows.len())
    }

    /// Records joined with their tasks, in date order.
    pub fn collect(
        pool: &mut DbPool,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<RecordExport>> {
        let recs = records::load_records_between(&pool.conn, bounds)?;

        let mut linked = HashMap::new();
        for id in recs.iter().filter_map(|r| r.task_id) {
            if !linked.contains_key(&id)
                && let Some(task) = tasks::load_task(&pool.conn, id)?
            {
                linked.insert(id, task);
            }
        }

        let now = Local::now();
        Ok(recs
            .iter()
            .map(|r| RecordExport::from_record(r, r.task_id.and_then(|id| linked.get(&id)), now))
            .collect())
    }
}
