use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::status::StatusLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date::parse_date_or_today;
use crate::utils::time::now_or;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Status {
        date,
        at,
        watch,
        count,
    } = &cli.command
    else {
        return Ok(());
    };

    let ctx = super::context(cli, cfg)?;
    let day = parse_date_or_today(date.as_ref())
        .ok_or_else(|| AppError::InvalidDate(date.clone().unwrap_or_default()))?;

    let mut pool = super::open_db(cfg)?;
    let views = StatusLogic::load(&mut pool, &ctx, day)?;

    if views.is_empty() {
        info(format!("No sessions for {} on {}.", ctx.employee(), day));
        return Ok(());
    }

    println!("Sessions of {} on {}\n", ctx.employee(), day);

    if *watch {
        return StatusLogic::watch(&views, cfg, *count);
    }

    let now = now_or(at.as_ref())?;
    for line in StatusLogic::render(&views, now, cfg) {
        println!("{}", line);
    }
    Ok(())
}
