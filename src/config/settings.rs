use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:6741";
pub const DEFAULT_LOAD_PATH: &str = "/api/models";
pub const DEFAULT_SAVE_PATH: &str = "/api/models/save";
pub const MAX_NOTIFICATION_TTL_SECS: u64 = 86_400;

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_load_path() -> String {
    DEFAULT_LOAD_PATH.to_string()
}

fn default_save_path() -> String {
    DEFAULT_SAVE_PATH.to_string()
}

fn default_notification_ttl_secs() -> u64 {
    crate::editor::notification::DEFAULT_NOTIFICATION_TTL_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EditorSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_load_path")]
    pub load_path: String,
    #[serde(default = "default_save_path")]
    pub save_path: String,
    #[serde(default = "default_notification_ttl_secs")]
    pub notification_ttl_secs: u64,
    /// Edit this file in place instead of going through the backend.
    #[serde(default)]
    pub models_file: Option<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            load_path: default_load_path(),
            save_path: default_save_path(),
            notification_ttl_secs: default_notification_ttl_secs(),
            models_file: None,
        }
    }
}

impl EditorSettings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Settings(format!(
                "`api_base` must be an http(s) url, got `{}`",
                self.api_base
            )));
        }
        for (field, value) in [("load_path", &self.load_path), ("save_path", &self.save_path)] {
            if !value.starts_with('/') {
                return Err(ConfigError::Settings(format!(
                    "`{field}` must start with `/`"
                )));
            }
        }
        if !(1..=MAX_NOTIFICATION_TTL_SECS).contains(&self.notification_ttl_secs) {
            return Err(ConfigError::Settings(format!(
                "`notification_ttl_secs` must be between 1 and {MAX_NOTIFICATION_TTL_SECS}"
            )));
        }
        if let Some(path) = &self.models_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Settings(
                    "`models_file` must be non-empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim().trim_end_matches('/'), path)
    }

    pub fn load_url(&self) -> String {
        self.endpoint(&self.load_path)
    }

    pub fn save_url(&self) -> String {
        self.endpoint(&self.save_path)
    }

    pub fn notification_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.notification_ttl_secs as i64)
    }
}
