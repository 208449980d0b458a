//! Console configuration.
//!
//! Values are resolved from CLI flags, then environment variables (a `.env` file is
//! honoured), then defaults:
//!
//! | Variable | Default |
//! |---|---|
//! | `ASSISTANT_CONSOLE_URL` | `http://127.0.0.1:8000` |
//! | `ASSISTANT_CONSOLE_TIMEOUT_SECS` | `10` |
//! | `ASSISTANT_CONSOLE_DOWNLOAD_DIR` | platform download dir, else `.` |

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_URL: &str = "ASSISTANT_CONSOLE_URL";
const ENV_TIMEOUT: &str = "ASSISTANT_CONSOLE_TIMEOUT_SECS";
const ENV_DOWNLOAD_DIR: &str = "ASSISTANT_CONSOLE_DOWNLOAD_DIR";

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Server root; always ends with `/` so endpoint paths join beneath it
    pub base_url: Url,
    pub request_timeout: Duration,
    /// Where downloaded dashboard reports are written
    pub download_dir: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: parse_base_url(DEFAULT_BASE_URL).expect("default URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            download_dir: default_download_dir(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_URL) {
            config = config.with_base_url(&url)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT.to_string(),
                value: raw.clone(),
            })?;
            config = config.with_timeout_secs(secs);
        }
        if let Some(dir) = lookup(ENV_DOWNLOAD_DIR).filter(|d| !d.trim().is_empty()) {
            config.download_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = Duration::from_secs(secs.max(1));
        self
    }

    pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
        self.download_dir = dir;
        self
    }
}

/// Parse and normalise the server base URL (http/https only, trailing slash)
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Platform download directory, falling back to the working directory
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Directory for the interactive session's log file
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("assistant-console"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ConsoleConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_environment_overrides() {
        let config = ConsoleConfig::from_lookup(lookup_from(&[
            (ENV_URL, "https://console.example.com/app"),
            (ENV_TIMEOUT, "30"),
            (ENV_DOWNLOAD_DIR, "/tmp/reports"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://console.example.com/app/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ConsoleConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_base_url_drops_query() {
        let url = parse_base_url("http://localhost:8000/?x=1#top").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = ConsoleConfig::default().with_timeout_secs(0);
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }
}
