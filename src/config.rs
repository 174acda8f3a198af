//! Configuration handling for the TUI

use crate::api::DEFAULT_ADDRESS;
use crate::state::ContentFilter;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API address
pub const API_ADDRESS_ENV: &str = "SURVEY_API_ADDRESS";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

const LOG_FILE_NAME: &str = "survey-tui.log";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Survey API base URL
    pub api_base_url: Option<String>,
    /// Substrings rejected in free-text answers (replaces the built-in list)
    pub forbidden_patterns: Option<Vec<String>>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "survey", "survey-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location; the terminal belongs to the UI while it runs
    pub fn log_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "survey", "survey-tui")
            .map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
    }

    /// Open `path` for appending, creating parent directories as needed
    pub fn open_log_file(path: &Path) -> io::Result<File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(path)
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// API address: environment, then config file, then default
    pub fn api_address(&self) -> String {
        Self::resolve_api_address(std::env::var(API_ADDRESS_ENV).ok(), self)
    }

    fn resolve_api_address(from_env: Option<String>, config: &TuiConfig) -> String {
        from_env
            .filter(|a| !a.trim().is_empty())
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
    }

    /// Denylist used to screen survey answers
    pub fn content_filter(&self) -> ContentFilter {
        match &self.forbidden_patterns {
            Some(patterns) => ContentFilter::new(patterns),
            None => ContentFilter::default(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.forbidden_patterns.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            api_base_url: Some("http://10.0.2.2:5000".to_string()),
            forbidden_patterns: Some(vec!["<iframe".to_string()]),
            request_timeout_secs: Some(30),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_base_url, Some("http://10.0.2.2:5000".to_string()));
        assert_eq!(parsed.forbidden_patterns, Some(vec!["<iframe".to_string()]));
        assert_eq!(parsed.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_base_url": "http://api", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_base_url, Some("http://api".to_string()));
    }

    #[test]
    fn test_address_prefers_environment() {
        let config = TuiConfig {
            api_base_url: Some("http://from-file".to_string()),
            ..Default::default()
        };
        assert_eq!(
            TuiConfig::resolve_api_address(Some("http://from-env".to_string()), &config),
            "http://from-env"
        );
        assert_eq!(
            TuiConfig::resolve_api_address(Some("  ".to_string()), &config),
            "http://from-file"
        );
        assert_eq!(
            TuiConfig::resolve_api_address(None, &TuiConfig::default()),
            DEFAULT_ADDRESS
        );
    }

    #[test]
    fn test_content_filter_default_and_override() {
        let default_filter = TuiConfig::default().content_filter();
        assert!(!default_filter.is_safe(["DROP TABLE"]));

        let config = TuiConfig {
            forbidden_patterns: Some(vec!["Badword".to_string()]),
            ..Default::default()
        };
        let filter = config.content_filter();
        assert!(!filter.is_safe(["a BADWORD here"]));
        assert!(filter.is_safe(["DROP TABLE"]));
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(
            TuiConfig::default().request_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        let config = TuiConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_log_path_file_name() {
        if let Some(path) = TuiConfig::log_path() {
            assert!(path.ends_with(LOG_FILE_NAME));
        }
    }

    #[test]
    fn test_open_log_file_creates_dirs_and_appends() {
        let dir = std::env::temp_dir().join(format!("survey-tui-log-{}", std::process::id()));
        let path = dir.join("nested").join(LOG_FILE_NAME);

        {
            use std::io::Write;
            let mut file = TuiConfig::open_log_file(&path).unwrap();
            writeln!(file, "first").unwrap();
            let mut file = TuiConfig::open_log_file(&path).unwrap();
            writeln!(file, "second").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_returns_ok() {
        // Falls back to default config when the file doesn't exist
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
