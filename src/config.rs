//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default form store address
const DEFAULT_API_BASE_URL: &str = "http://localhost/form-builder-api";

/// Environment variable overriding the form store address
const API_URL_ENV: &str = "FORM_BUILDER_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_CATEGORY_ID: i64 = 1;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Form store base URL
    pub api_base_url: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Category preselected for new forms
    pub default_category_id: Option<i64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = Some(url);
            }
        }

        Ok(config)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn default_category_id(&self) -> i64 {
        self.default_category_id.unwrap_or(DEFAULT_CATEGORY_ID)
    }
}

/// Platform directories for config and logs
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "formbuilder", "form-builder-tui")
}

/// Log file location in the platform data directory
pub fn log_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("form-builder-tui.log"))
}
