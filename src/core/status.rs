//! Timer display: elapsed time and progress for the sessions of a day.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{records, tasks};
use crate::errors::AppResult;
use crate::models::context::Context;
use crate::models::record_status::RecordStatus;
use crate::models::task::Task;
use crate::models::time_record::TimeRecord;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::{format_hms, progress_bar};
use chrono::{DateTime, Local, NaiveDate};
use std::io::{self, Write};
use std::thread;
use std::time::Duration as StdDuration;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct SessionView {
    pub record: TimeRecord,
    pub task: Option<Task>,
}

impl SessionView {
    /// Progress target: the task estimate, or a full workday.
    pub fn target_minutes(&self, workday_minutes: i64) -> i64 {
        self.task
            .as_ref()
            .and_then(|t| t.estimate_minutes)
            .unwrap_or(workday_minutes)
            .max(1)
    }

    pub fn progress(&self, now: DateTime<Local>, workday_minutes: i64) -> f64 {
        let worked = self.record.worked_ms(now) as f64;
        worked / (self.target_minutes(workday_minutes) as f64 * 60_000.0)
    }

    pub fn render(&self, now: DateTime<Local>, workday_minutes: i64) -> String {
        let title = match &self.task {
            Some(t) => format!("#{} {}", t.id, t.title),
            None => "work day".to_string(),
        };

        let (color, state) = match self.record.status {
            RecordStatus::Working => (GREEN, "working"),
            RecordStatus::Paused => (YELLOW, "paused"),
            RecordStatus::Finished => (GREY, "finished"),
            RecordStatus::NotStarted => (GREY, "not started"),
        };

        format!(
            "[{:>3}] {}{:<9}{} {} {} {}",
            self.record.id,
            color,
            state,
            RESET,
            format_hms(self.record.worked_ms(now)),
            progress_bar(self.progress(now, workday_minutes), BAR_WIDTH),
            title
        )
    }
}

pub struct StatusLogic;

impl StatusLogic {
    /// Records of `date` plus anything still open from earlier days.
    pub fn load(pool: &mut DbPool, ctx: &Context, date: NaiveDate) -> AppResult<Vec<SessionView>> {
        let mut recs = records::load_records_by_date(&pool.conn, ctx.employee(), &date)?;

        for open in records::load_open_records(&pool.conn, ctx.employee())? {
            if !recs.iter().any(|r| r.id == open.id) {
                recs.push(open);
            }
        }

        let mut views = Vec::with_capacity(recs.len());
        for record in recs {
            let task = match record.task_id {
                Some(id) => tasks::load_task(&pool.conn, id)?,
                None => None,
            };
            views.push(SessionView { record, task });
        }
        Ok(views)
    }

    /// Worked milliseconds across all views.
    pub fn total_ms(views: &[SessionView], now: DateTime<Local>) -> i64 {
        views.iter().map(|v| v.record.worked_ms(now)).sum()
    }

    pub fn render(views: &[SessionView], now: DateTime<Local>, cfg: &Config) -> Vec<String> {
        let workday = cfg.workday_minutes();
        let mut lines: Vec<String> = views.iter().map(|v| v.render(now, workday)).collect();

        let total = Self::total_ms(views, now);
        lines.push(format!(
            "Total  {} {}",
            format_hms(total),
            progress_bar(total as f64 / (workday.max(1) as f64 * 60_000.0), BAR_WIDTH)
        ));
        lines
    }

    /// Redraw the block every `tick_seconds` from the already loaded views;
    /// nothing is read from the database again. Stops after `count` ticks
    /// when given, otherwise runs until interrupted.
    pub fn watch(views: &[SessionView], cfg: &Config, count: Option<u64>) -> AppResult<()> {
        let tick = StdDuration::from_secs(cfg.tick_seconds.max(1));
        let mut stdout = io::stdout();
        let mut drawn = 0usize;
        let mut ticks = 0u64;

        loop {
            if drawn > 0 {
                // Move the cursor back over the previous block.
                write!(stdout, "\x1b[{}A", drawn)?;
            }

            let lines = Self::render(views, Local::now(), cfg);
            for line in &lines {
                writeln!(stdout, "\x1b[2K{}", line)?;
            }
            stdout.flush()?;
            drawn = lines.len();

            ticks += 1;
            if count.is_some_and(|c| ticks >= c) {
                return Ok(());
            }
            thread::sleep(tick);
        }
    }
}
