use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tasks::TaskLogic;
use crate::errors::{AppError, AppResult};
use crate::models::task_status::TaskStatus;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, RED, RESET};
use crate::utils::date::parse_date_or_today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Overdue {
        update,
        stats,
        today,
    } = cmd
    else {
        return Ok(());
    };

    let day = parse_date_or_today(today.as_ref())
        .ok_or_else(|| AppError::InvalidDate(today.clone().unwrap_or_default()))?;
    let mut pool = super::open_db(cfg)?;

    if *update {
        let changed = TaskLogic::update_overdue(&mut pool, day)?;
        if changed == 0 {
            info("No tasks to mark overdue.");
        } else {
            success(format!("{} task(s) marked overdue.", changed));
        }
    }

    // Without flags, show the statistics.
    if *stats || !*update {
        let s = TaskLogic::overdue_stats(&mut pool, day)?;

        println!("{}Tasks by status (as of {}):{}", CYAN, day, RESET);
        for status in TaskStatus::ALL {
            println!("  {:<12} {}", status.to_string(), s.count(status));
        }

        if !s.overdue_by_assignee.is_empty() {
            println!("{}Overdue by assignee:{}", CYAN, RESET);
            for (who, n) in &s.overdue_by_assignee {
                println!("  {:<12} {}", who, n);
            }
        }

        if s.late_not_flagged > 0 {
            println!(
                "{}{} past-due task(s) not yet flagged; run `overdue --update`.{}",
                RED, s.late_not_flagged, RESET
            );
        }
    }

    Ok(())
}
