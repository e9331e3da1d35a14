use crate::cli::parser::Commands;
use crate::config::Config;
use crate::export::ExportLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let mut pool = super::open_db(cfg)?;
        ExportLogic::export(&mut pool, *format, file, range, *force)?;
    }
    Ok(())
}
