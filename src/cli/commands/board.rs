use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::session::SessionController;
use crate::db::sqlite_store::SqliteStore;
use crate::errors::AppResult;
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::format_hms;
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctx = super::context(cli, cfg)?;
    let pool = super::open_db(cfg)?;

    let board = SessionController::new(SqliteStore::new(&pool.conn)).board(&ctx)?;
    let now = Local::now();

    println!("In progress for {}:", ctx.employee());
    if board.active.is_empty() {
        println!("{GREY}  nothing running{RESET}");
    } else {
        let mut table = Table::new(vec![
            Column::new("Rec"),
            Column::new("Task"),
            Column::new("Status"),
            Column::new("Worked"),
        ]);
        for (rec, task) in &board.active {
            let title = match task {
                Some(t) => format!("#{} {}", t.id, t.title),
                None => "work day".to_string(),
            };
            table.add_row(vec![
                rec.id.to_string(),
                title,
                rec.status.to_string(),
                format_hms(rec.worked_ms(now)),
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
    }

    println!("\nAvailable to accept:");
    if board.available.is_empty() {
        println!("{GREY}  no open tasks{RESET}");
    } else {
        let mut table = Table::new(vec![
            Column::new("ID"),
            Column::new("Title"),
            Column::new("Status"),
            Column::new("Due"),
        ]);
        for t in &board.available {
            table.add_row(vec![
                t.id.to_string(),
                t.title.clone(),
                t.status.to_string(),
                t.due_str(),
            ]);
        }
        print!("{}", table.render(&cfg.separator_char));
    }

    Ok(())
}
