//! Configuration
//!
//! A JSON document addressed with dot-notation keys (`"logging.level"`),
//! plus the typed views the engine and the logger are built from.

use crate::logging::LogLevel;
use crate::utils::json::{self, JsonError};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Indent used when writing configuration files
pub const CONFIG_INDENT: usize = 4;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("No configuration file path set")]
    NoPath,
}

/// Logger settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub console: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
            file: None,
        }
    }
}

/// Hash engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Upper bound on Merkle leaves accepted per call; `None` is unbounded
    pub max_merkle_leaves: Option<usize>,
}

/// Configuration document
#[derive(Debug, Clone)]
pub struct Config {
    data: Value,
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: Self::default_config(),
            path: None,
        }
    }
}

impl Config {
    /// Create a configuration holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// The default configuration document
    pub fn default_config() -> Value {
        json!({
            "logging": {
                "level": "info",
                "console": true,
                "file": null,
            },
            "merkle": {
                "max_leaves": null,
            },
        })
    }

    /// Wrap an existing document after validating it
    pub fn from_value(data: Value) -> Result<Self, ConfigError> {
        let config = Self { data, path: None };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = json::load_from_file(path)?;
        let mut config = Self::from_value(data)?;
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save to `path`, or back to the file this configuration came from
    pub fn save_to_file(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let target = path.or(self.path.as_deref()).ok_or(ConfigError::NoPath)?;
        json::save_to_file(&self.data, target, CONFIG_INDENT)?;
        Ok(())
    }

    /// Re-read the file this configuration came from
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let path = self.path.clone().ok_or(ConfigError::NoPath)?;
        *self = Self::load_from_file(path)?;
        Ok(())
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn as_value(&self) -> &Value {
        &self.data
    }

    /// Value at a dotted key, `Null` if missing
    pub fn get_value(&self, key: &str) -> Value {
        json::get_nested_value(&self.data, key)
    }

    /// Set a dotted key, creating intermediate objects as needed
    ///
    /// Intermediate values that are not objects are replaced. An empty key
    /// replaces the whole document.
    pub fn set_value(&mut self, key: &str, value: Value) {
        let parts: Vec<&str> = json::split_path(key).collect();
        let Some((last, parents)) = parts.split_last() else {
            self.data = value;
            return;
        };

        let mut current = &mut self.data;
        for part in parents {
            let Some(map) = ensure_object(current) else {
                return;
            };
            current = map.entry(part.to_string()).or_insert(Value::Null);
        }
        if let Some(map) = ensure_object(current) {
            map.insert(last.to_string(), value);
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        json::has_nested_key(&self.data, key)
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        json::lookup(&self.data, key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        json::lookup(&self.data, key)
            .and_then(Value::as_i64)
            .unwrap_or(default)
    }

    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        json::lookup(&self.data, key)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        json::lookup(&self.data, key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// String elements of an array; other elements are skipped
    pub fn get_string_array(&self, key: &str) -> Vec<String> {
        json::lookup(&self.data, key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.set_value(key, Value::from(value));
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set_value(key, Value::from(value));
    }

    pub fn set_double(&mut self, key: &str, value: f64) {
        self.set_value(key, Value::from(value));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set_value(key, Value::from(value));
    }

    pub fn set_string_array(&mut self, key: &str, value: &[String]) {
        self.set_value(key, Value::from(value.to_vec()));
    }

    /// Check the sections this crate reads
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.data.is_object() {
            return Err(ConfigError::Invalid(
                "configuration root must be an object".to_string(),
            ));
        }

        match json::lookup(&self.data, "logging.level") {
            None | Some(Value::Null) => {}
            Some(Value::String(level)) => {
                level.parse::<LogLevel>().map_err(ConfigError::Invalid)?;
            }
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "logging.level must be a string, got {}",
                    other
                )))
            }
        }

        match json::lookup(&self.data, "merkle.max_leaves") {
            None | Some(Value::Null) => {}
            Some(value) if value.as_u64().map_or(false, |n| n > 0) => {}
            Some(other) => {
                return Err(ConfigError::Invalid(format!(
                    "merkle.max_leaves must be a positive integer or null, got {}",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Logger settings, defaults filling any gaps
    pub fn logging_config(&self) -> LoggingConfig {
        let defaults = LoggingConfig::default();
        let level = json::lookup(&self.data, "logging.level")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.level);
        let file = json::lookup(&self.data, "logging.file")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        LoggingConfig {
            level,
            console: self.get_bool("logging.console", defaults.console),
            file,
        }
    }

    /// Engine settings, defaults filling any gaps
    pub fn engine_config(&self) -> EngineConfig {
        let max_merkle_leaves = json::lookup(&self.data, "merkle.max_leaves")
            .and_then(Value::as_u64)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok());

        EngineConfig { max_merkle_leaves }
    }
}

/// Turn `value` into an object if it is not one and borrow its map
fn ensure_object(value: &mut Value) -> Option<&mut Map<String, Value>> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    value.as_object_mut()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.logging_config(), LoggingConfig::default());
        assert_eq!(config.engine_config(), EngineConfig::default());
        assert!(config.config_file_path().is_none());
    }

    #[test]
    fn test_set_and_get_dotted() {
        let mut config = Config::new();
        config.set_string("service.name", "hasher");
        config.set_int("service.limits.depth", 12);
        config.set_double("service.ratio", 0.5);
        config.set_bool("service.enabled", true);
        config.set_string_array("service.tags", &["a".to_string(), "b".to_string()]);

        assert_eq!(config.get_string("service.name", ""), "hasher");
        assert_eq!(config.get_int("service.limits.depth", 0), 12);
        assert_eq!(config.get_double("service.ratio", 0.0), 0.5);
        assert!(config.get_bool("service.enabled", false));
        assert_eq!(config.get_string_array("service.tags"), vec!["a", "b"]);
        assert!(config.has_key("service.limits"));
        assert!(!config.has_key("service.missing"));
        assert_eq!(config.get_int("service.name", -1), -1);
    }

    #[test]
    fn test_set_value_replaces_scalar_parent() {
        let mut config = Config::new();
        config.set_int("a", 1);
        config.set_int("a.b", 2);
        assert_eq!(config.get_value("a"), json!({ "b": 2 }));

        config.set_string("a.b.c", "deep");
        config.set_value("", json!({ "x": [1] }));
        config.set_bool("x.y", true);
        assert_eq!(config.get_value(""), json!({ "x": { "y": true } }));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Config::from_value(json!([1, 2])).is_err());
        assert!(Config::from_value(json!({ "logging": { "level": "loud" } })).is_err());
        assert!(Config::from_value(json!({ "logging": { "level": 3 } })).is_err());
        assert!(Config::from_value(json!({ "merkle": { "max_leaves": 0 } })).is_err());
        assert!(Config::from_value(json!({ "merkle": { "max_leaves": -4 } })).is_err());
        assert!(Config::from_value(json!({})).is_ok());
    }

    #[test]
    fn test_typed_views() {
        let config = Config::from_value(json!({
            "logging": { "level": "warning", "console": false, "file": "engine.log" },
            "merkle": { "max_leaves": 1024 },
        }))
        .unwrap();

        let logging = config.logging_config();
        assert_eq!(logging.level, LogLevel::Warning);
        assert!(!logging.console);
        assert_eq!(logging.file, Some(PathBuf::from("engine.log")));
        assert_eq!(config.engine_config().max_merkle_leaves, Some(1024));
    }

    #[test]
    fn test_save_load_reload() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = Config::new();
        config.set_int("merkle.max_leaves", 8);
        config.save_to_file(Some(&path)).unwrap();

        let mut loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.engine_config().max_merkle_leaves, Some(8));
        assert_eq!(loaded.config_file_path(), Some(path.as_path()));

        loaded.set_string("logging.level", "debug");
        loaded.save_to_file(None).unwrap();
        loaded.reload().unwrap();
        assert_eq!(loaded.logging_config().level, LogLevel::Debug);
        assert_eq!(loaded.engine_config().max_merkle_leaves, Some(8));
    }

    #[test]
    fn test_save_without_path() {
        let config = Config::new();
        assert!(matches!(config.save_to_file(None), Err(ConfigError::NoPath)));
        let mut config = Config::new();
        assert!(matches!(config.reload(), Err(ConfigError::NoPath)));
    }
}
