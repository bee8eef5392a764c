//! Runtime configuration
//!
//! Resolution order for the data directory: explicit override (CLI flag),
//! then `SPENDTRACK_DATA_DIR`, then `~/.spendtrack`.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::types::{Result, SpendtrackError};

pub const DATA_DIR_ENV: &str = "SPENDTRACK_DATA_DIR";
pub const USER_ENV: &str = "SPENDTRACK_USER";
pub const LOG_FORMAT_ENV: &str = "SPENDTRACK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    /// Resolve from an optional override and the process environment
    pub fn resolve(data_dir_override: Option<PathBuf>) -> Result<Self> {
        Self::resolve_with(data_dir_override, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        data_dir_override: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let data_dir = match data_dir_override {
            Some(dir) => dir,
            None => match env(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => default_data_dir()?,
            },
        };

        Ok(Self {
            data_dir,
            log_format: LogFormat::parse(env(LOG_FORMAT_ENV).as_deref()),
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new()
        .ok_or_else(|| SpendtrackError::Config("Cannot determine home directory".into()))?;
    Ok(base_dirs.home_dir().join(".spendtrack"))
}

/// Caller identity: explicit value first, then `SPENDTRACK_USER`
pub fn resolve_caller(explicit: Option<String>) -> Option<String> {
    resolve_caller_with(explicit, |key| std::env::var(key).ok())
}

fn resolve_caller_with(
    explicit: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .or_else(|| env(USER_ENV))
        .filter(|id| !id.trim().is_empty())
}
