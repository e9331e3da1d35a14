use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tasks::TaskLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date_or_today;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::DuplicateDaily { date } = cmd {
        let day = parse_date_or_today(date.as_ref())
            .ok_or_else(|| AppError::InvalidDate(date.clone().unwrap_or_default()))?;

        let mut pool = super::open_db(cfg)?;
        let created = TaskLogic::duplicate_daily(&mut pool, day)?;

        if created.is_empty() {
            info(format!("No daily tasks to copy onto {}.", day));
        } else {
            let ids: Vec<String> = created.iter().map(|id| format!("#{id}")).collect();
            success(format!(
                "{} daily task(s) created for {}: {}",
                created.len(),
                day,
                ids.join(", ")
            ));
        }
    }
    Ok(())
}
