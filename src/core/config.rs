use crate::config::migrate::{fill_missing_keys, missing_keys};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &Path) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Report missing keys; returns how many are missing.
    pub fn check(path: &Path) -> AppResult<usize> {
        let missing = missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing keys: {}", missing.join(", ")));
            info("Run `config --migrate` to add them with default values.");
        }
        Ok(missing.len())
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        let added = fill_missing_keys(path)?;
        if added.is_empty() {
            info("Configuration already up to date.");
        } else {
            success(format!("Added keys: {}", added.join(", ")));
        }
        Ok(())
    }

    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let ed = editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".into()
                } else {
                    "nano".into()
                }
            });

        let status = Command::new(&ed)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot launch '{ed}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{ed}' exited with {status}")));
        }
        Ok(())
    }
}
