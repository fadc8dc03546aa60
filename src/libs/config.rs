//! Configuration management for the timesheet application.
//!
//! Settings come from two layers:
//!
//! 1. **Config file**: `config.json` in the per-user data directory (see
//!    [`DataStorage`]), written by the interactive `init` wizard. It holds the
//!    Jira base URL, project key and username, and the Tempo API URL.
//! 2. **Flags and environment**: `--jira-url` / `JIRA_URL` and friends. A
//!    value given here wins over the file.
//!
//! API tokens are never written to disk; they only come from the second layer.
//! [`Settings::resolve`] merges both layers once at startup into an immutable
//! value that is handed to the API clients.
//!
//! ```rust,no_run
//! use timesheet::libs::config::{Config, Overrides, Settings};
//!
//! let config = Config::read()?;
//! let settings = Settings::resolve(config, Overrides::default())?;
//! println!("Jira project: {}", settings.jira.project_key);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::jira::JiraConfig;
use crate::api::tempo::{TempoConfig, DEFAULT_API_URL};
use crate::libs::error::TimesheetError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted configuration. Unconfigured sections are omitted from the file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira: Option<JiraConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<TempoConfig>,
}

impl Config {
    /// Reads the configuration from the default data directory.
    ///
    /// A missing file is not an error: the default (empty) configuration is
    /// returned so that flags and environment alone are enough to run.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.path(CONFIG_FILE_NAME);
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| TimesheetError::config(format!("{}: {}", config_file_path.display(), e)))?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON to the default data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` if there was none.
    pub fn delete_from(storage: &DataStorage) -> Result<bool> {
        let config_file_path = storage.path(CONFIG_FILE_NAME);
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Runs the interactive setup wizard, starting from the current file.
    pub fn init() -> Result<Config> {
        let config = Config::read()?;
        Ok(Config {
            jira: Some(JiraConfig::init(&config.jira)?),
            tempo: Some(TempoConfig::init(&config.tempo)?),
        })
    }
}

/// Values given on the command line or in the environment.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub jira_url: Option<String>,
    pub jira_project_key: Option<String>,
    pub jira_user: Option<String>,
    pub jira_token: Option<String>,
    pub tempo_token: Option<String>,
    pub tempo_url: Option<String>,
}

/// Fully resolved, immutable settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub jira: JiraConfig,
    pub tempo: TempoConfig,
}

impl Settings {
    /// Merges `overrides` over `config`.
    ///
    /// # Errors
    ///
    /// [`TimesheetError::Config`] naming every required value that is missing
    /// from both layers, with the flag and environment variable that set it.
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Settings, TimesheetError> {
        let jira = config.jira.unwrap_or_default();
        let tempo = config.tempo.unwrap_or_default();
        let mut missing = Vec::new();

        let mut pick = |value: Option<String>, stored: String, flag: &str, env: &str| -> String {
            let value = value.filter(|v| !v.trim().is_empty()).unwrap_or(stored);
            if value.trim().is_empty() {
                missing.push(format!("--{} ({})", flag, env));
            }
            value
        };

        let settings = Settings {
            jira: JiraConfig {
                api_url: pick(overrides.jira_url, jira.api_url, "jira-url", "JIRA_URL"),
                project_key: pick(overrides.jira_project_key, jira.project_key, "jira-project-key", "JIRA_PROJECT_KEY"),
                login: pick(overrides.jira_user, jira.login, "jira-user", "JIRA_USERNAME"),
                token: pick(overrides.jira_token, String::new(), "jira-token", "JIRA_TOKEN"),
            },
            tempo: TempoConfig {
                api_url: overrides
                    .tempo_url
                    .filter(|v| !v.trim().is_empty())
                    .or(Some(tempo.api_url).filter(|v| !v.trim().is_empty()))
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                token: pick(overrides.tempo_token, String::new(), "tempo-token", "TEMPO_TOKEN"),
            },
        };

        if !missing.is_empty() {
            return Err(TimesheetError::config(format!("missing required settings: {}", missing.join(", "))));
        }
        Ok(settings)
    }
}
