use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} not found; run `init` first",
                path.display()
            )));
        }

        if *print_config {
            ConfigLogic::print(&path)?;
        }
        if *check {
            ConfigLogic::check(&path)?;
        }
        if *migrate {
            ConfigLogic::migrate(&path)?;
        }
        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
