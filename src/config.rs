//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::constants::{DEFAULT_COUNTRY_CODE, DEFAULT_DATE_FORMAT};

/// User configuration for the intake TUI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Registry endpoint; the `INTAKE_REGISTRY_URL` env var wins when set
    pub registry_url: Option<String>,
    /// Stable user id attached to submissions; generated and saved when absent
    pub user_id: Option<String>,
    /// Prefix assumed for phone numbers typed without a country code
    #[serde(default = "default_country_code")]
    pub default_country_code: String,
    /// chrono format string for the date of birth field
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            registry_url: None,
            user_id: None,
            default_country_code: default_country_code(),
            date_format: default_date_format(),
        }
    }
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "intake", "intake-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user's config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: IntakeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}
