//! Runtime configuration, read from the environment (and `.env` if present)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::model::StalePolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_DIR: &str = ".logs";

pub const API_URL_VAR: &str = "MOODIFY_API_URL";
pub const TIMEOUT_VAR: &str = "MOODIFY_TIMEOUT_SECS";
pub const STALE_POLICY_VAR: &str = "MOODIFY_STALE_POLICY";
pub const LOG_DIR_VAR: &str = "MOODIFY_LOG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} has invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: Url,
    /// `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    pub stale_policy: StalePolicy,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: None,
            stale_policy: StalePolicy::default(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    /// for unset or blank variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(API_URL_VAR) {
            let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                var: API_URL_VAR,
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidUrl {
                    var: API_URL_VAR,
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            config.api_url = url;
        }

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: TIMEOUT_VAR,
                value: raw.clone(),
                reason: "expected a whole number of seconds",
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: TIMEOUT_VAR,
                    value: raw,
                    reason: "timeout must be greater than zero",
                });
            }
            config.timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = get(STALE_POLICY_VAR) {
            config.stale_policy = match raw.to_lowercase().as_str() {
                "last-write-wins" => StalePolicy::LastWriteWins,
                "latest-only" => StalePolicy::LatestOnly,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: STALE_POLICY_VAR,
                        value: raw,
                        reason: "expected 'last-write-wins' or 'latest-only'",
                    });
                }
            };
        }

        if let Some(raw) = get(LOG_DIR_VAR) {
            config.log_dir = PathBuf::from(raw);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.timeout, None);
        assert_eq!(config.stale_policy, StalePolicy::LastWriteWins);
        assert_eq!(config.log_dir, PathBuf::from(".logs"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (API_URL_VAR, "https://moods.example.com/api"),
            (TIMEOUT_VAR, "15"),
            (STALE_POLICY_VAR, "Latest-Only"),
            (LOG_DIR_VAR, "/tmp/moodify"),
        ])
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://moods.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.stale_policy, StalePolicy::LatestOnly);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/moodify"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = load(&[(API_URL_VAR, "  "), (TIMEOUT_VAR, "")]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = load(&[(API_URL_VAR, "not a url")]).unwrap_err();
        assert!(err.to_string().contains(API_URL_VAR));

        let err = load(&[(API_URL_VAR, "ftp://example.com")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));

        let err = load(&[(TIMEOUT_VAR, "soon")]).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));

        let err = load(&[(TIMEOUT_VAR, "0")]).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        let err = load(&[(STALE_POLICY_VAR, "first-wins")]).unwrap_err();
        assert!(err.to_string().contains(STALE_POLICY_VAR));
    }
}
