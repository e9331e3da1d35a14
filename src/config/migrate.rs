//! Config file upgrades: detect and fill keys added after the file was written.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every key a current config file is expected to carry.
pub const EXPECTED_KEYS: [&str; 6] = [
    "database",
    "default_employee",
    "tick_seconds",
    "workday_duration",
    "single_active_session",
    "separator_char",
];

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Return the expected keys absent from the config file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Write default values for every missing key, keeping the existing ones.
/// Returns the keys that were added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let missing = missing_keys(path)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let defaults = serde_yaml::to_value(Config::default()).map_err(|_| AppError::ConfigSave)?;
    let defaults = defaults.as_mapping().cloned().unwrap_or_default();

    for key in &missing {
        let k = Value::String((*key).to_string());
        if let Some(v) = defaults.get(&k) {
            map.insert(k, v.clone());
        }
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, serialized)?;

    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, body: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{name}_rtasktracker.conf"));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reports_and_fills_missing_keys() {
        let path = temp_conf("cfg_fill", "database: /tmp/a.sqlite\ntick_seconds: 5\n");

        let missing = missing_keys(&path).unwrap();
        assert!(missing.contains(&"default_employee"));
        assert!(!missing.contains(&"tick_seconds"));

        let added = fill_missing_keys(&path).unwrap();
        assert_eq!(added, missing);
        assert!(missing_keys(&path).unwrap().is_empty());

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.tick_seconds, 5);
        assert_eq!(cfg.database, "/tmp/a.sqlite");

        fs::remove_file(&path).ok();
    }
}
