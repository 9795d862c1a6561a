//! Platform-specific configuration and paths

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "VENDOR_PANEL_API_URL";

/// Built-in API base URL used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://api.vendorpanel.in/api/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default notification poll interval in seconds
pub const DEFAULT_POLL_SECS: u64 = 120;

/// Get the application config directory
/// - macOS: ~/Library/Application Support/vendor-panel/
/// - Linux: ~/.config/vendor-panel/
/// - Windows: %APPDATA%/vendor-panel/
pub fn config_dir() -> Result<PathBuf> {
    let config = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config.join("vendor-panel"))
}

/// Get the application data directory (holds the session store)
/// - macOS: ~/Library/Application Support/vendor-panel/
/// - Linux: ~/.local/share/vendor-panel/
/// - Windows: %APPDATA%/vendor-panel/
pub fn data_dir() -> Result<PathBuf> {
    let data = dirs::data_dir().context("Could not determine data directory")?;
    Ok(data.join("vendor-panel"))
}

/// Path of the session database
pub fn session_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("session.db"))
}

/// Settings read from `config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
}

impl FileConfig {
    /// Read a config file; a missing file yields the defaults
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse: {}", path.display()))
    }
}

/// Resolved API configuration
///
/// The base URL has exactly one source of truth per run:
/// env var, then config file, then the built-in default.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
    pub poll_interval_secs: u64,
}

impl ApiConfig {
    /// Build a config for an explicit base URL
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_SECS,
        })
    }

    /// Load from the environment and the user's config file
    pub fn load() -> Result<Self> {
        let file = FileConfig::read(config_dir()?.join("config.json"))?;
        Self::resolve(std::env::var(API_URL_ENV).ok(), file)
    }

    fn resolve(env_url: Option<String>, file: FileConfig) -> Result<Self> {
        let url = env_url
            .filter(|u| !u.trim().is_empty())
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            base_url: parse_base_url(&url)?,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            poll_interval_secs: file.poll_interval_secs.unwrap_or(DEFAULT_POLL_SECS),
        })
    }
}

/// Parse a base URL, forcing a trailing slash so relative joins keep the path prefix
fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&with_slash).with_context(|| format!("Invalid API URL: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_paths_exist() {
        // These should not panic
        let _ = config_dir();
        let _ = data_dir();
        let _ = session_db_path();
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ApiConfig::new("http://localhost:8000/api").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/api/");
        assert_eq!(
            config.base_url.join("vendor/login").unwrap().as_str(),
            "http://localhost:8000/api/vendor/login"
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            api_url: Some("http://file.example/api".to_string()),
            timeout_secs: Some(5),
            poll_interval_secs: None,
        };
        let config =
            ApiConfig::resolve(Some("http://env.example/api".to_string()), file).unwrap();
        assert_eq!(config.base_url.host_str(), Some("env.example"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_SECS);
    }

    #[test]
    fn test_blank_env_falls_back_to_default() {
        let config = ApiConfig::resolve(Some("  ".to_string()), FileConfig::default()).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_invalid_url_is_error() {
        assert!(ApiConfig::new("not a url").is_err());
    }

    #[test]
    fn test_read_file_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "apiUrl": "http://10.0.0.5:5000/api", "pollIntervalSecs": 30 }}"#)
            .unwrap();
        let parsed = FileConfig::read(file.path()).unwrap();
        assert_eq!(parsed.api_url.as_deref(), Some("http://10.0.0.5:5000/api"));
        assert_eq!(parsed.poll_interval_secs, Some(30));
    }

    #[test]
    fn test_missing_file_config_is_default() {
        let parsed = FileConfig::read("/nonexistent/vendor-panel/config.json").unwrap();
        assert!(parsed.api_url.is_none());
    }
}
