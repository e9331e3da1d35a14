//! rTaskTracker library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Task { .. } => commands::task::handle(cli, cfg),
        Commands::Accept { .. }
        | Commands::Start { .. }
        | Commands::Pause(_)
        | Commands::Resume(_)
        | Commands::Finish(_) => commands::session::handle(cli, cfg),
        Commands::Status { .. } => commands::status::handle(cli, cfg),
        Commands::Board => commands::board::handle(cli, cfg),
        Commands::Overdue { .. } => commands::overdue::handle(&cli.command, cfg),
        Commands::DuplicateDaily { .. } => commands::duplicate::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load the config once; `--db` wins over the configured database.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
