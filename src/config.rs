use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::ids::IdStrategy;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_LOG_FILE: &str = "taskgrid.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Read tasks from this JSON file instead of the built-in seed list.
    pub seed_file: Option<PathBuf>,
    pub id_strategy: IdStrategy,
    pub page_size: usize,
    pub load_delay: Duration,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_file: None,
            id_strategy: IdStrategy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            load_delay: Duration::ZERO,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Reads `TASKGRID_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = lookup("TASKGRID_SEED_FILE").filter(|p| !p.is_empty()) {
            config.seed_file = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup("TASKGRID_ID_STRATEGY") {
            config.id_strategy = value
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "TASKGRID_ID_STRATEGY",
                    message,
                })?;
        }

        if let Some(value) = lookup("TASKGRID_PAGE_SIZE") {
            config.page_size = match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "TASKGRID_PAGE_SIZE",
                        message: format!("expected a positive integer, got '{}'", value),
                    })
                }
            };
        }

        if let Some(value) = lookup("TASKGRID_LOAD_DELAY_MS") {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "TASKGRID_LOAD_DELAY_MS",
                    message: e.to_string(),
                })?;
            config.load_delay = Duration::from_millis(millis);
        }

        if let Some(path) = lookup("TASKGRID_LOG_FILE").filter(|p| !p.is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }
}
