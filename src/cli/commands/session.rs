//! accept / start / pause / resume / finish

use crate::cli::parser::{Cli, Commands, SessionArgs};
use crate::config::Config;
use crate::core::session::{RecordSelector, SessionController};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::sqlite_store::SqliteStore;
use crate::db::tasks;
use crate::errors::AppResult;
use crate::models::context::Context;
use crate::models::time_record::TimeRecord;
use crate::ui::messages::success;
use crate::utils::formatting::format_hms;
use crate::utils::time::now_or;
use chrono::{DateTime, Local};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctx = super::context(cli, cfg)?;
    let mut pool = super::open_db(cfg)?;

    match &cli.command {
        Commands::Accept { task, at } => {
            let now = now_or(at.as_ref())?;
            let rec = transition(&mut pool, cfg, &ctx, "accept", |ctl, ctx| {
                ctl.accept(ctx, *task, now)
            })?;

            let title = tasks::load_task(&pool.conn, *task)?
                .map(|t| format!(" '{}'", t.title))
                .unwrap_or_default();
            success(format!(
                "▶ Accepted task #{}{} at {} (record #{}).",
                task,
                title,
                clock(now),
                rec.id
            ));
        }

        Commands::Start { at } => {
            let now = now_or(at.as_ref())?;
            let rec = transition(&mut pool, cfg, &ctx, "start", |ctl, ctx| {
                ctl.start_day(ctx, now)
            })?;
            success(format!(
                "▶ Work day started at {} (record #{}).",
                clock(now),
                rec.id
            ));
        }

        Commands::Pause(args) => {
            let (sel, now) = selection(args)?;
            let rec = transition(&mut pool, cfg, &ctx, "pause", |ctl, ctx| {
                ctl.pause(ctx, sel, now)
            })?;
            success(format!(
                "⏸ Paused record #{} at {} (worked {}).",
                rec.id,
                clock(now),
                format_hms(rec.worked_ms(now))
            ));
        }

        Commands::Resume(args) => {
            let (sel, now) = selection(args)?;
            let rec = transition(&mut pool, cfg, &ctx, "resume", |ctl, ctx| {
                ctl.resume(ctx, sel, now)
            })?;
            success(format!(
                "▶ Resumed record #{} at {} ({} min paused in total).",
                rec.id,
                clock(now),
                rec.pause_duration
            ));
        }

        Commands::Finish(args) => {
            let (sel, now) = selection(args)?;
            let rec = transition(&mut pool, cfg, &ctx, "finish", |ctl, ctx| {
                ctl.finish(ctx, sel, now)
            })?;
            success(format!(
                "⏹ Finished record #{} at {}: worked {} ({:.2} h).",
                rec.id,
                clock(now),
                format_hms(rec.worked_ms(now)),
                rec.total_hours.unwrap_or(0.0)
            ));
            if let Some(task_id) = rec.task_id {
                success(format!("Task #{} completed.", task_id));
            }
        }

        _ => {}
    }

    Ok(())
}

/// Run one controller operation in its own IMMEDIATE transaction, then
/// write the audit line once the change is committed.
fn transition<F>(
    pool: &mut DbPool,
    cfg: &Config,
    ctx: &Context,
    operation: &str,
    op: F,
) -> AppResult<TimeRecord>
where
    F: for<'c> FnOnce(&mut SessionController<SqliteStore<'c>>, &Context) -> AppResult<TimeRecord>,
{
    let rec = pool.in_transaction(|conn| {
        let mut ctl = SessionController::new(SqliteStore::new(conn))
            .single_active_session(cfg.single_active_session);
        op(&mut ctl, ctx)
    })?;

    ttlog_quiet(
        &pool.conn,
        operation,
        &format!("#{}", rec.id),
        &format!(
            "{} {} record {} ({})",
            ctx.label(),
            operation,
            rec.task_label(),
            rec.status
        ),
    );

    Ok(rec)
}

fn selection(args: &SessionArgs) -> AppResult<(RecordSelector, DateTime<Local>)> {
    let now = now_or(args.at.as_ref())?;
    Ok((RecordSelector::from_args(args.record, args.task), now))
}

fn clock(dt: DateTime<Local>) -> String {
    dt.format("%H:%M").to_string()
}
