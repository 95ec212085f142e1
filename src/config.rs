//! Application configuration.
//!
//! Everything lives under `~/.pwshell/` unless overridden through the
//! environment.

use anyhow::{Result, anyhow};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::shell::history::HistoryConfig;

pub const ENV_DB: &str = "PWSHELL_DB";
pub const ENV_READ_ONLY: &str = "PWSHELL_READ_ONLY";
pub const ENV_LOG_LEVEL: &str = "PWSHELL_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database file to open.
    pub db_path: PathBuf,
    /// Open the database without allowing writes.
    pub read_only: bool,
    pub log: LogConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Builds the default layout rooted at `base`.
    pub fn with_base_dir(base: &Path) -> Self {
        Self {
            db_path: base.join("accounts.db"),
            read_only: false,
            log: LogConfig::new(base.join("pwshell.log")),
            history: HistoryConfig::new(base.join("history")),
        }
    }

    /// Default configuration under the user's home directory.
    pub fn default_for_user() -> Result<Self> {
        let home = dirs_next::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self::with_base_dir(&home.join(".pwshell")))
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(flag) = lookup(ENV_READ_ONLY) {
            self.read_only = parse_flag(&flag)
                .ok_or_else(|| anyhow!("{} must be a boolean, got '{}'", ENV_READ_ONLY, flag))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log.level = level
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("{} is not a log level: '{}'", ENV_LOG_LEVEL, level))?;
        }
        Ok(self)
    }

    /// Default configuration with process environment overrides applied.
    pub fn load() -> Result<Self> {
        Self::default_for_user()?.apply_overrides(|key| std::env::var(key).ok())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
