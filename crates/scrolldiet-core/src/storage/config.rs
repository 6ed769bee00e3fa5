//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Budget defaults used by the setup flow
//! - Tracker timing (seconds per scroll, tick interval)
//! - Notification preferences and toast duration
//! - Content service settings
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::budget::{DEFAULT_DAILY_LIMIT, MIN_DAILY_LIMIT};
use crate::error::ConfigError;

/// Budget defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_min_limit")]
    pub min_limit: u32,
    /// Step used by `limit up` / `limit down`.
    #[serde(default = "default_limit_step")]
    pub limit_step: u32,
}

/// Tracker-mode timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Estimated time spent per reel/tiktok.
    #[serde(default = "default_seconds_per_scroll")]
    pub seconds_per_scroll: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Whether system-level alerts are permitted.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_toast_duration_secs")]
    pub toast_duration_secs: u64,
}

/// Generated-content service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_initial_batch")]
    pub initial_batch: usize,
    #[serde(default = "default_more_batch")]
    pub more_batch: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

// Default functions
fn default_limit() -> u32 {
    DEFAULT_DAILY_LIMIT
}
fn default_min_limit() -> u32 {
    MIN_DAILY_LIMIT
}
fn default_limit_step() -> u32 {
    5
}
fn default_seconds_per_scroll() -> u64 {
    15
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_toast_duration_secs() -> u64 {
    4
}
fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_initial_batch() -> usize {
    5
}
fn default_more_batch() -> usize {
    3
}
fn default_timeout_secs() -> u64 {
    20
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            min_limit: default_min_limit(),
            limit_step: default_limit_step(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seconds_per_scroll: default_seconds_per_scroll(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            toast_duration_secs: default_toast_duration_secs(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            initial_batch: default_initial_batch(),
            more_batch: default_more_batch(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TrackerConfig {
    pub fn per_unit(&self) -> Duration {
        Duration::from_secs(self.seconds_per_scroll)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl NotificationsConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_duration_secs)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default location of the config file.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the defaults cannot
    /// be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the result fails validation. `self` is untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values that would break the tracker or the budget floor.
    ///
    /// # Errors
    /// Returns the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let check = |ok: bool, key: &str, message: &str| {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: message.to_string(),
                })
            }
        };
        check(self.budget.min_limit > 0, "budget.min_limit", "must be greater than zero")?;
        check(
            self.budget.default_limit >= self.budget.min_limit,
            "budget.default_limit",
            "must be at least budget.min_limit",
        )?;
        check(self.budget.limit_step > 0, "budget.limit_step", "must be greater than zero")?;
        check(
            self.tracker.seconds_per_scroll > 0,
            "tracker.seconds_per_scroll",
            "must be greater than zero",
        )?;
        check(
            self.tracker.tick_interval_ms > 0,
            "tracker.tick_interval_ms",
            "must be greater than zero",
        )?;
        check(self.content.initial_batch > 0, "content.initial_batch", "must be greater than zero")?;
        check(self.content.more_batch > 0, "content.more_batch", "must be greater than zero")?;
        Ok(())
    }

    /// Clamp a requested limit to the configured floor.
    pub fn clamp_limit(&self, limit: u32) -> u32 {
        limit.max(self.budget.min_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.budget.default_limit, 50);
        assert_eq!(parsed.tracker.seconds_per_scroll, 15);
        assert_eq!(parsed.notifications.toast_duration_secs, 4);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[tracker]\nseconds_per_scroll = 30\n").unwrap();
        assert_eq!(parsed.tracker.seconds_per_scroll, 30);
        assert_eq!(parsed.tracker.tick_interval_ms, 1000);
        assert_eq!(parsed.budget.min_limit, 5);
        assert_eq!(parsed.content.model, "gemini-2.5-flash");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("tracker.seconds_per_scroll").as_deref(), Some("15"));
        assert_eq!(cfg.get("content.model").as_deref(), Some("gemini-2.5-flash"));
        assert!(cfg.get("tracker.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("notifications.enabled", "false").unwrap();
        cfg.set("tracker.seconds_per_scroll", "20").unwrap();
        cfg.set("content.model", "gemini-2.0-flash").unwrap();
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.tracker.seconds_per_scroll, 20);
        assert_eq!(cfg.content.model, "gemini-2.0-flash");
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("tracker.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.set("", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.enabled", "maybe").is_err());
        assert!(cfg.set("tracker.seconds_per_scroll", "-4").is_err());
        assert!(cfg.set("tracker", "1").is_err());
    }

    #[test]
    fn set_rejects_zero_unit_duration_and_leaves_config_alone() {
        let mut cfg = Config::default();
        assert!(cfg.set("tracker.seconds_per_scroll", "0").is_err());
        assert_eq!(cfg.tracker.seconds_per_scroll, 15);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.budget.default_limit, 50);
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("budget.default_limit", "80").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().budget.default_limit, 80);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn clamp_limit_uses_configured_floor() {
        let cfg = Config::default();
        assert_eq!(cfg.clamp_limit(2), 5);
        assert_eq!(cfg.clamp_limit(45), 45);
    }
}
