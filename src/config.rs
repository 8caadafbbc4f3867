use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment override for the remote API base URL.
pub const API_BASE_URL_ENV: &str = "FLOURISH_API_BASE_URL";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("flourish")
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct FlourishConfig {
    /// Where the local plant blob and selection slot live.
    pub data_directory: PathBuf,
    /// Base URL of the remote `/api/plants` resource. When set (here or
    /// via `FLOURISH_API_BASE_URL`), the remote backend is used.
    pub api_base_url: Option<String>,
    pub debug_logging: bool,
}

impl Default for FlourishConfig {
    fn default() -> Self {
        Self {
            data_directory: default_data_dir(),
            api_base_url: None,
            debug_logging: false,
        }
    }
}

impl FlourishConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flourish").join("config.json"))
    }

    /// Read the config file, falling back to defaults when it is missing
    /// or malformed, then apply the environment override.
    pub fn load() -> Self {
        let mut config = Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .map(|content| Self::from_json(&content))
            .unwrap_or_default();

        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = Some(url.trim().to_string());
            }
        }
        config
    }

    fn from_json(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }
}
