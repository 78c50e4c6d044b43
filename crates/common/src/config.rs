use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::SinkKind;

/// Config file consulted when `PAGEWATCH_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
const DEFAULT_RETRIES: u32 = 5;
const DEFAULT_BACKOFF_FACTOR: u64 = 2;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_BACKOFF_SECS: u64 = 300;

/// Longest accepted check interval (30 days).
pub const MAX_CHECK_INTERVAL_SECS: u64 = 30 * 24 * 60 * 60;

/// Where notification messages are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub kind: SinkKind,

    /// Destination address (webhook URL). `None` disables delivery; every
    /// attempt is then logged as an error.
    pub url: Option<String>,
}

/// Monitor configuration, loaded once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Pages to check each cycle, in the order outcomes are reported.
    pub urls: Vec<String>,

    /// Case-sensitive text expected on every page.
    pub keyword: String,

    /// Nominal pause between cycles (jittered by the scheduler).
    pub check_interval: Duration,

    /// Maximum number of GET attempts per URL per cycle.
    pub retries: u32,

    /// Backoff multiplier in seconds: attempt `i` failing waits `factor * 2^i`.
    pub backoff_factor: u64,

    /// Ceiling on a single backoff sleep.
    pub max_backoff: Duration,

    /// Per-request timeout for page fetches and webhook posts.
    pub request_timeout: Duration,

    pub notification: SinkConfig,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    urls: Vec<String>,
    keyword: Option<String>,
    check_interval: Option<u64>,
    notification: Option<FileNotification>,
    retries: Option<u32>,
    backoff_factor: Option<u64>,
    request_timeout: Option<u64>,
    max_backoff: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FileNotification {
    #[serde(rename = "type")]
    kind: Option<String>,
    url: Option<String>,
}

impl MonitorConfig {
    /// Load configuration from the JSON config file if it exists, otherwise
    /// from environment variables (after reading an optional `.env`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path = std::env::var("PAGEWATCH_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if Path::new(&path).exists() {
            tracing::info!(path = %path, "Loading configuration from file");
            Self::from_file(&path)
        } else {
            tracing::info!("No config file found, loading configuration from environment");
            Self::from_env()
        }
    }

    /// Load and validate a JSON config file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(path, &raw)
    }

    /// Parse and validate a JSON config document. `origin` only labels errors.
    pub fn from_json(origin: &str, raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;

        let notification = file.notification.unwrap_or(FileNotification {
            kind: None,
            url: None,
        });
        let kind = match notification.kind {
            Some(kind) => parse_sink_kind(&kind)?,
            None => SinkKind::Slack,
        };

        let config = Self {
            urls: file.urls,
            keyword: file.keyword.ok_or(ConfigError::Missing("keyword"))?,
            check_interval: Duration::from_secs(
                file.check_interval.unwrap_or(DEFAULT_CHECK_INTERVAL_SECS),
            ),
            retries: file.retries.unwrap_or(DEFAULT_RETRIES),
            backoff_factor: file.backoff_factor.unwrap_or(DEFAULT_BACKOFF_FACTOR),
            max_backoff: Duration::from_secs(file.max_backoff.unwrap_or(DEFAULT_MAX_BACKOFF_SECS)),
            request_timeout: Duration::from_secs(
                file.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            notification: SinkConfig {
                kind,
                url: non_blank(notification.url),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup using the environment
    /// variable names (`URLS`, `KEYWORD`, `CHECK_INTERVAL`, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let urls = lookup("URLS")
            .ok_or(ConfigError::Missing("URLS"))?
            .split(',')
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(String::from)
            .collect();

        let kind = match lookup("NOTIFICATION_TYPE") {
            Some(kind) => parse_sink_kind(&kind)?,
            None => SinkKind::Slack,
        };

        let config = Self {
            urls,
            keyword: lookup("KEYWORD").ok_or(ConfigError::Missing("KEYWORD"))?,
            check_interval: Duration::from_secs(parse_or(
                &lookup,
                "CHECK_INTERVAL",
                DEFAULT_CHECK_INTERVAL_SECS,
            )?),
            retries: parse_or(&lookup, "RETRIES", DEFAULT_RETRIES)?,
            backoff_factor: parse_or(&lookup, "BACKOFF_FACTOR", DEFAULT_BACKOFF_FACTOR)?,
            max_backoff: Duration::from_secs(parse_or(
                &lookup,
                "MAX_BACKOFF",
                DEFAULT_MAX_BACKOFF_SECS,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            notification: SinkConfig {
                kind,
                url: non_blank(lookup("NOTIFICATION_URL")),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would run a no-op or malformed monitor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.urls.is_empty() {
            return Err(ConfigError::Missing("urls"));
        }
        if let Some(pos) = self.urls.iter().position(|u| u.trim().is_empty()) {
            return Err(ConfigError::invalid("urls", format!("entry {pos} is blank")));
        }
        if self.keyword.trim().is_empty() {
            return Err(ConfigError::Missing("keyword"));
        }
        if self.check_interval.is_zero() {
            return Err(ConfigError::invalid("check_interval", "must be positive"));
        }
        if self.check_interval > Duration::from_secs(MAX_CHECK_INTERVAL_SECS) {
            return Err(ConfigError::invalid(
                "check_interval",
                format!("must be at most {MAX_CHECK_INTERVAL_SECS} seconds"),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::invalid("request_timeout", "must be positive"));
        }
        Ok(())
    }

    /// Log the effective configuration. The notification destination is a
    /// secret and is only reported as present or absent.
    pub fn log_redacted(&self) {
        tracing::info!(
            urls = self.urls.len(),
            keyword = %self.keyword,
            check_interval_secs = self.check_interval.as_secs(),
            retries = self.retries,
            backoff_factor = self.backoff_factor,
            max_backoff_secs = self.max_backoff.as_secs(),
            request_timeout_secs = self.request_timeout.as_secs(),
            sink = %self.notification.kind,
            sink_configured = self.notification.url.is_some(),
            "Monitor configuration loaded"
        );
        if self.retries == 0 {
            tracing::warn!("RETRIES is 0: no fetch attempts will be made, every URL will alert");
        }
    }
}

fn parse_sink_kind(raw: &str) -> Result<SinkKind, ConfigError> {
    raw.parse()
        .map_err(|reason| ConfigError::invalid("notification.type", reason))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(key, format!("'{raw}' is not a valid number"))),
        None => Ok(default),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_defaults() {
        let config = MonitorConfig::from_lookup(lookup_from(&[
            ("URLS", "http://a.test, http://b.test,,"),
            ("KEYWORD", "OK"),
        ]))
        .unwrap();

        assert_eq!(config.urls, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.keyword, "OK");
        assert_eq!(config.check_interval, Duration::from_secs(60));
        assert_eq!(config.retries, 5);
        assert_eq!(config.backoff_factor, 2);
        assert_eq!(config.max_backoff, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.notification.kind, SinkKind::Slack);
        assert_eq!(config.notification.url, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = MonitorConfig::from_lookup(lookup_from(&[
            ("URLS", "http://a.test"),
            ("KEYWORD", "OK"),
            ("CHECK_INTERVAL", "15"),
            ("RETRIES", "3"),
            ("BACKOFF_FACTOR", "1"),
            ("REQUEST_TIMEOUT", "5"),
            ("MAX_BACKOFF", "20"),
            ("NOTIFICATION_TYPE", "slack"),
            ("NOTIFICATION_URL", "https://hooks.slack.test/T000"),
        ]))
        .unwrap();

        assert_eq!(config.check_interval, Duration::from_secs(15));
        assert_eq!(config.retries, 3);
        assert_eq!(config.backoff_factor, 1);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_backoff, Duration::from_secs(20));
        assert_eq!(
            config.notification.url.as_deref(),
            Some("https://hooks.slack.test/T000")
        );
    }

    #[test]
    fn test_env_missing_urls_is_fatal() {
        let err = MonitorConfig::from_lookup(lookup_from(&[("KEYWORD", "OK")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("URLS")));

        let err = MonitorConfig::from_lookup(lookup_from(&[("URLS", " , "), ("KEYWORD", "OK")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("urls")));
    }

    #[test]
    fn test_env_missing_keyword_is_fatal() {
        let err =
            MonitorConfig::from_lookup(lookup_from(&[("URLS", "http://a.test")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("KEYWORD")));

        let err = MonitorConfig::from_lookup(lookup_from(&[
            ("URLS", "http://a.test"),
            ("KEYWORD", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("keyword")));
    }

    #[test]
    fn test_env_invalid_numbers() {
        let err = MonitorConfig::from_lookup(lookup_from(&[
            ("URLS", "http://a.test"),
            ("KEYWORD", "OK"),
            ("RETRIES", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "RETRIES", .. }));

        let err = MonitorConfig::from_lookup(lookup_from(&[
            ("URLS", "http://a.test"),
            ("KEYWORD", "OK"),
            ("CHECK_INTERVAL", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "check_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_env_unknown_sink_kind() {
        let err = MonitorConfig::from_lookup(lookup_from(&[
            ("URLS", "http://a.test"),
            ("KEYWORD", "OK"),
            ("NOTIFICATION_TYPE", "carrier-pigeon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "notification.type",
                ..
            }
        ));
    }

    #[test]
    fn test_json_full_document() {
        let raw = r#"{
            "urls": ["http://a.test", "http://b.test"],
            "keyword": "OK",
            "check_interval": 120,
            "notification": {"type": "slack", "url": "https://hooks.slack.test/T000"},
            "retries": 3,
            "backoff_factor": 2
        }"#;
        let config = MonitorConfig::from_json("config.json", raw).unwrap();

        assert_eq!(config.urls.len(), 2);
        assert_eq!(config.check_interval, Duration::from_secs(120));
        assert_eq!(config.retries, 3);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.notification.kind, SinkKind::Slack);
        assert!(config.notification.url.is_some());
    }

    #[test]
    fn test_json_blank_destination_is_none() {
        let raw = r#"{"urls": ["http://a.test"], "keyword": "OK", "notification": {"url": ""}}"#;
        let config = MonitorConfig::from_json("config.json", raw).unwrap();
        assert_eq!(config.notification.url, None);
    }

    #[test]
    fn test_json_empty_urls_is_fatal() {
        let raw = r#"{"urls": [], "keyword": "OK"}"#;
        let err = MonitorConfig::from_json("config.json", raw).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("urls")));
    }

    #[test]
    fn test_json_check_interval_upper_bound() {
        let raw = r#"{"urls": ["http://a.test"], "keyword": "OK", "check_interval": 18446744073709551615}"#;
        let err = MonitorConfig::from_json("config.json", raw).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "check_interval",
                ..
            }
        ));

        let raw = format!(
            r#"{{"urls": ["http://a.test"], "keyword": "OK", "check_interval": {MAX_CHECK_INTERVAL_SECS}}}"#
        );
        let config = MonitorConfig::from_json("config.json", &raw).unwrap();
        assert_eq!(config.check_interval, Duration::from_secs(MAX_CHECK_INTERVAL_SECS));
    }

    #[test]
    fn test_json_malformed() {
        let err = MonitorConfig::from_json("config.json", "{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_example_config_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config.example.json");
        let config = MonitorConfig::from_file(path).unwrap();
        assert_eq!(config.urls.len(), 2);
        assert_eq!(config.keyword, "In stock");
    }

    #[test]
    fn test_missing_file() {
        let err = MonitorConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
