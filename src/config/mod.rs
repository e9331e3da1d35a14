use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

pub const APP_DIR: &str = "rtasktracker";
pub const CONFIG_FILE: &str = "rtasktracker.conf";
pub const DATABASE_FILE: &str = "rtasktracker.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub default_employee: String,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    #[serde(default = "default_workday_duration")]
    pub workday_duration: String,
    /// When true an employee may hold only one working/paused session at a time.
    #[serde(default)]
    pub single_active_session: bool,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_tick_seconds() -> u64 {
    1
}
fn default_workday_duration() -> String {
    "8h".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_employee: env::var("USER")
                .or_else(|_| env::var("USERNAME"))
                .unwrap_or_default(),
            tick_seconds: default_tick_seconds(),
            workday_duration: default_workday_duration(),
            single_active_session: false,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_DIR)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(format!(".{APP_DIR}"))
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DATABASE_FILE)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Workday length in minutes, parsed from `workday_duration` ("8h", "7h30m", "450m").
    pub fn workday_minutes(&self) -> i64 {
        crate::utils::time::parse_duration_minutes(&self.workday_duration).unwrap_or(8 * 60)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = crate::utils::path::expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            dir.join(DATABASE_FILE)
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        // Create empty DB file if not exists
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_use_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.tick_seconds, 1);
        assert_eq!(cfg.workday_duration, "8h");
        assert!(!cfg.single_active_session);
        assert_eq!(cfg.default_employee, "");
    }

    #[test]
    fn workday_minutes_falls_back_on_garbage() {
        let cfg = Config {
            workday_duration: "lots".into(),
            ..Config::default()
        };
        assert_eq!(cfg.workday_minutes(), 480);

        let cfg = Config {
            workday_duration: "7h30m".into(),
            ..Config::default()
        };
        assert_eq!(cfg.workday_minutes(), 450);
    }
}
