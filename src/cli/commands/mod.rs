pub mod backup;
pub mod board;
pub mod config;
pub mod db;
pub mod duplicate;
pub mod export;
pub mod init;
pub mod log;
pub mod overdue;
pub mod session;
pub mod status;
pub mod task;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::context::Context;

/// Acting user for this invocation, from `--employee` / `--as` / config.
pub(crate) fn context(cli: &Cli, cfg: &Config) -> AppResult<Context> {
    Context::resolve(cli.employee.as_ref(), cli.acting_as.as_ref(), cfg)
}

/// Open the configured database and bring its schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    crate::db::initialize::init_db(&pool.conn)?;
    Ok(pool)
}
