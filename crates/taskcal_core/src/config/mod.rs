use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKCAL_CONFIG_PATH";

pub const DEFAULT_POLL_SECS: u64 = 60;
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Store file override; the TASKCAL_STORE_PATH env var wins over this.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub reminder_poll_secs: Option<u64>,
    #[serde(default)]
    pub upcoming_window_days: Option<i64>,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_poll_secs.unwrap_or(DEFAULT_POLL_SECS))
    }

    pub fn upcoming_window(&self) -> i64 {
        self.upcoming_window_days.unwrap_or(DEFAULT_UPCOMING_DAYS)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskcal").join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskcal")
            .join(CONFIG_FILE_NAME))
    }
}

/// Loads the config, falling back to defaults when the file is missing or
/// unreadable. A parse failure is reported alongside the defaults so the
/// caller can warn without aborting.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    Ok(config)
}
