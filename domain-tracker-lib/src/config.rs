//! Configuration loading and management.
//!
//! Runtime settings come from environment variables (API key, webhook URL,
//! check interval, watchlist path), optionally seeded by a TOML config file
//! discovered in the standard locations. Environment variables always win
//! over file values.

use crate::error::DomainTrackerError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default availability lookup timeout when nothing else is configured.
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;

/// Allowed range for the check interval, in hours.
const INTERVAL_HOURS_RANGE: std::ops::RangeInclusive<u64> = 1..=24;

/// Resolved runtime settings for the tracker.
///
/// Required environment variables: `WHOIS_API_KEY`, `SLACK_WEBHOOK_URL`.
/// Optional: `CHECK_INTERVAL_HOURS` (1-24, default 1), `DOMAINS_FILE_PATH`
/// (default `domains.txt`), `DT_TIMEOUT` (e.g. `5s`, `2m`), `DT_NOTIFY_ALL`.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API key for the WhoisXML API service.
    pub whois_api_key: String,

    /// Slack incoming-webhook URL for availability notifications.
    pub slack_webhook_url: String,

    /// Hours between availability sweeps (informational for schedulers
    /// driving the CLI; the tracker itself runs one sweep per invocation).
    pub check_interval_hours: u64,

    /// Path to the file listing domains to monitor.
    pub domains_file_path: PathBuf,

    /// Timeout for each availability lookup.
    pub lookup_timeout: Duration,

    /// Send Slack alerts for every domain, not only available ones.
    pub notify_all: bool,
}

impl Settings {
    /// Load settings from environment variables only.
    pub fn from_env() -> Result<Self, DomainTrackerError> {
        Self::load(&FileConfig::default())
    }

    /// Load settings from a file config with environment overrides.
    ///
    /// File values seed the optional fields; environment variables override
    /// them; the two required keys must come from the environment.
    pub fn load(file_config: &FileConfig) -> Result<Self, DomainTrackerError> {
        let defaults = file_config.defaults.clone().unwrap_or_default();

        let whois_api_key = require_env("WHOIS_API_KEY")?;
        let slack_webhook_url = require_env("SLACK_WEBHOOK_URL")?;
        if !slack_webhook_url.starts_with("http") {
            return Err(DomainTrackerError::config(
                "SLACK_WEBHOOK_URL must be an http(s) URL",
            ));
        }

        let mut check_interval_hours = defaults.interval_hours.unwrap_or(1);
        if let Ok(val) = env::var("CHECK_INTERVAL_HOURS") {
            match val.parse::<u64>() {
                Ok(hours) if INTERVAL_HOURS_RANGE.contains(&hours) => {
                    check_interval_hours = hours;
                }
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid CHECK_INTERVAL_HOURS, must be 1-24; keeping {}",
                        check_interval_hours
                    );
                }
            }
        }

        let mut domains_file_path = defaults
            .domains_file
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("domains.txt"));
        if let Ok(path) = env::var("DOMAINS_FILE_PATH") {
            if !path.trim().is_empty() {
                domains_file_path = PathBuf::from(path);
            }
        }

        let mut lookup_timeout_secs = defaults
            .timeout
            .as_deref()
            .and_then(parse_timeout_string)
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS);
        if let Ok(val) = env::var("DT_TIMEOUT") {
            match parse_timeout_string(&val) {
                Some(secs) => lookup_timeout_secs = secs,
                None => {
                    tracing::warn!(
                        value = %val,
                        "Invalid DT_TIMEOUT, use format like '5s', '30s', '2m'"
                    );
                }
            }
        }

        let mut notify_all = defaults.notify_all.unwrap_or(false);
        if let Ok(val) = env::var("DT_NOTIFY_ALL") {
            match parse_bool_string(&val) {
                Some(flag) => notify_all = flag,
                None => {
                    tracing::warn!(value = %val, "Invalid DT_NOTIFY_ALL, use true/false");
                }
            }
        }

        Ok(Self {
            whois_api_key,
            slack_webhook_url,
            check_interval_hours,
            domains_file_path,
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
            notify_all,
        })
    }
}

fn require_env(key: &str) -> Result<String, DomainTrackerError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(DomainTrackerError::config(format!(
            "Missing required environment variable {}",
            key
        ))),
    }
}

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values applied when the environment does not override them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

/// Default configuration values that mirror the environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default lookup timeout (as string, e.g. "5s", "30s", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default for sending alerts on every domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_all: Option<bool>,

    /// Default domains watchlist path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domains_file: Option<String>,

    /// Default check interval in hours (1-24)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_hours: Option<u64>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainTrackerError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainTrackerError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainTrackerError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| {
            DomainTrackerError::config(format!("Failed to parse TOML configuration: {}", e))
        })?;

        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// XDG config is loaded first, then the home-directory config, then the
    /// local config; later files win field by field.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainTrackerError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Global config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        if self.verbose && loaded_files.len() > 1 {
            tracing::warn!("Multiple config files found, using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "active"
                } else {
                    "overridden"
                };
                tracing::warn!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path, if one exists.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-tracker.toml", "./.domain-tracker.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the global configuration file path in the user's home directory.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".domain-tracker.toml", "domain-tracker.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-tracker").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations; values from `higher` win field by field.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.notify_all.is_some() {
                        lower_defaults.notify_all = higher_defaults.notify_all;
                    }
                    if higher_defaults.domains_file.is_some() {
                        lower_defaults.domains_file = higher_defaults.domains_file;
                    }
                    if higher_defaults.interval_hours.is_some() {
                        lower_defaults.interval_hours = higher_defaults.interval_hours;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), DomainTrackerError> {
        if let Some(defaults) = &config.defaults {
            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(DomainTrackerError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '30s', '2m'",
                        timeout_str
                    )));
                }
            }

            if let Some(hours) = defaults.interval_hours {
                if !INTERVAL_HOURS_RANGE.contains(&hours) {
                    return Err(DomainTrackerError::config(
                        "interval_hours must be between 1 and 24",
                    ));
                }
            }

            if let Some(domains_file) = &defaults.domains_file {
                if domains_file.trim().is_empty() {
                    return Err(DomainTrackerError::config(
                        "domains_file cannot be empty",
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Parse a timeout string like "5s", "30s", "2m" into seconds.
pub(crate) fn parse_timeout_string(timeout_str: &str) -> Option<u64> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if timeout_str.ends_with('s') {
        timeout_str
            .strip_suffix('s')
            .and_then(|s| s.parse::<u64>().ok())
    } else if timeout_str.ends_with('m') {
        timeout_str
            .strip_suffix('m')
            .and_then(|s| s.parse::<u64>().ok())
            .map(|m| m * 60)
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok()
    }
}

/// Parse a boolean-ish environment value.
fn parse_bool_string(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
