use crate::cli::parser::{Cli, Commands, TaskAction};
use crate::config::Config;
use crate::core::tasks::{NewTask, TaskLogic};
use crate::db::records;
use crate::errors::{AppError, AppResult};
use crate::models::task::Task;
use crate::models::task_status::TaskStatus;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::{parse_date, today};
use crate::utils::formatting::{format_hms, mins2hhmm};
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_duration_minutes;
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = &cli.command else {
        return Ok(());
    };

    let ctx = super::context(cli, cfg)?;
    let mut pool = super::open_db(cfg)?;

    match action {
        TaskAction::Add {
            title,
            description,
            assignee,
            project,
            due,
            estimate,
            daily,
        } => {
            let due_date = match due {
                Some(d) => Some(parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?),
                None => None,
            };
            let estimate_minutes = match estimate {
                Some(e) => Some(
                    parse_duration_minutes(e).ok_or_else(|| AppError::InvalidTime(e.clone()))?,
                ),
                None => None,
            };

            let task = TaskLogic::add(
                &mut pool,
                &ctx,
                NewTask {
                    title: title.clone(),
                    description: description.clone(),
                    assignee: assignee.clone(),
                    project: project.clone(),
                    due_date,
                    estimate_minutes,
                    daily: *daily,
                },
            )?;

            success(format!(
                "Task #{} '{}' created for {}.",
                task.id, task.title, task.assignee
            ));
        }

        TaskAction::List {
            assignee,
            mine,
            status,
        } => {
            let status = match status {
                Some(s) => Some(
                    TaskStatus::from_code(s).ok_or_else(|| AppError::InvalidTaskStatus(s.clone()))?,
                ),
                None => None,
            };
            let who = if *mine {
                Some(ctx.employee())
            } else {
                assignee.as_deref()
            };

            let tasks = TaskLogic::list(&mut pool, who, status)?;
            if tasks.is_empty() {
                info("No tasks found.");
                return Ok(());
            }
            print!("{}", task_table(&tasks).render(&cfg.separator_char));
        }

        TaskAction::Show { id } => {
            let task = TaskLogic::get(&mut pool, *id)?;
            print_task(&task);

            let recs = records::load_records_for_task(&pool.conn, task.id)?;
            if recs.is_empty() {
                println!("\n{GREY}No time records.{RESET}");
                return Ok(());
            }

            let now = Local::now();
            let mut table = Table::new(vec![
                Column::new("Rec"),
                Column::new("Employee"),
                Column::new("Date"),
                Column::new("Status"),
                Column::new("Pause"),
                Column::new("Worked"),
            ]);
            for r in &recs {
                table.add_row(vec![
                    r.id.to_string(),
                    r.employee.clone(),
                    r.date.to_string(),
                    r.status.to_string(),
                    mins2hhmm(r.pause_duration),
                    format_hms(r.worked_ms(now)),
                ]);
            }
            println!();
            print!("{}", table.render(&cfg.separator_char));
        }

        TaskAction::Del { id, yes } => {
            let task = TaskLogic::get(&mut pool, *id)?;
            if !*yes {
                warning(format!(
                    "Task #{} '{}' and all its time records will be deleted.",
                    task.id, task.title
                ));
                if !confirm("Continue?")? {
                    info("Nothing deleted.");
                    return Ok(());
                }
            }

            let removed = TaskLogic::delete(&mut pool, &ctx, *id)?;
            success(format!(
                "Task #{} deleted ({} time record(s) removed).",
                id, removed
            ));
        }
    }

    Ok(())
}

fn task_table(tasks: &[Task]) -> Table {
    let today = today();
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Title"),
        Column::new("Assignee"),
        Column::new("Status"),
        Column::new("Due"),
        Column::new("Estimate"),
    ]);

    for t in tasks {
        let due = if t.is_late(today) {
            format!("{} late", t.due_str())
        } else {
            t.due_str()
        };
        let title = if t.daily {
            format!("{} (daily)", t.title)
        } else {
            t.title.clone()
        };

        table.add_row(vec![
            t.id.to_string(),
            title,
            t.assignee.clone(),
            t.status.to_string(),
            due,
            t.estimate_minutes
                .map(mins2hhmm)
                .unwrap_or_else(|| "--".to_string()),
        ]);
    }
    table
}

fn print_task(t: &Task) {
    println!("Task #{}: {}", t.id, t.title);
    println!("  Assignee : {}", t.assignee);
    println!("  Status   : {}", t.status);
    println!("  Project  : {}", t.project.as_deref().unwrap_or("--"));
    println!("  Due      : {}", t.due_str());
    if let Some(m) = t.estimate_minutes {
        println!("  Estimate : {}", mins2hhmm(m));
    }
    if t.daily {
        println!("  Recurs   : daily");
    }
    if !t.description.is_empty() {
        println!("\n{}", t.description);
    }
}
