use std::{path::PathBuf, str::FromStr, time::Duration};

use log::LevelFilter;

use super::err::CustomError;

pub const DELAY_VAR: &str = "STUDENT_API_DELAY_MS";
pub const SEED_VAR: &str = "STUDENT_SEED";
pub const IMPORT_CSV_VAR: &str = "STUDENT_IMPORT_CSV";
pub const LOG_LEVEL_VAR: &str = "STUDENT_LOG_LEVEL";

/// Runtime settings, read from the environment (and a `.env` file when present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// simulated latency of every store operation
    pub delay: Duration,
    /// start from the seed collection instead of an empty store
    pub seed: bool,
    /// csv file imported into the store at startup
    pub import_csv: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            seed: true,
            import_csv: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, CustomError> {
        // a missing .env file is fine
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// build the config from any key lookup, unset keys fall back to the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CustomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(delay) = value(DELAY_VAR) {
            let millis: u64 = parse_var(DELAY_VAR, &delay)?;
            config.delay = Duration::from_millis(millis);
        }
        if let Some(seed) = value(SEED_VAR) {
            config.seed = parse_bool(SEED_VAR, &seed)?;
        }
        config.import_csv = value(IMPORT_CSV_VAR).map(PathBuf::from);
        if let Some(level) = value(LOG_LEVEL_VAR) {
            config.log_level = parse_var(LOG_LEVEL_VAR, &level)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, CustomError> {
    value
        .parse()
        .map_err(|_| CustomError::ConfigError(format!("{}={} is not valid", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CustomError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CustomError::ConfigError(format!(
            "{}={} is not a boolean",
            key, value
        ))),
    }
}
