//! Server configuration: defaults, JSON config file, environment overrides.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. `~/.aura/config.json` (partial files are fine, unknown keys are kept
//!    out by the typed deserialize)
//! 3. `AURA_*` environment variables

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Errors from loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not valid JSON for [`ServerConfig`].
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind.
    pub host: String,

    /// Port to bind (0 = auto-assign).
    pub port: u16,

    /// Path to the `SQLite` database. `None` falls back to the binary's
    /// default under `~/.aura/`.
    pub db_path: Option<PathBuf>,

    /// Log level filter for stderr output (`error`, `warn`, `info`, `debug`,
    /// `trace`).
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8111,
            db_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// Resolve the config file path (`~/.aura/config.json`).
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".aura").join("config.json")
}

/// Load configuration from the default path with env overrides applied.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    load_config_from_path(&config_path())
}

/// Load configuration from a specific path.
///
/// A missing file is not an error (defaults apply). A present but malformed
/// file is an error, so typos do not silently fall back to defaults.
pub fn load_config_from_path(path: &Path) -> Result<ServerConfig, ConfigError> {
    let mut merged = serde_json::to_value(ServerConfig::default())?;

    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let file_value: serde_json::Value = serde_json::from_str(&raw)?;
        deep_merge(&mut merged, file_value);
    }

    let mut config: ServerConfig = serde_json::from_value(merged)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Recursively merge `overlay` into `base`. Objects merge key by key,
/// everything else is replaced wholesale.
fn deep_merge(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                deep_merge(
                    base_map.entry(key).or_insert(serde_json::Value::Null),
                    value,
                );
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}

fn apply_env_overrides(config: &mut ServerConfig) {
    if let Some(host) = read_env_string("AURA_HOST") {
        config.host = host;
    }
    if let Some(port) = read_env_u16("AURA_PORT") {
        config.port = port;
    }
    if let Some(path) = read_env_string("AURA_DB_PATH") {
        config.db_path = Some(PathBuf::from(path));
    }
    if let Some(level) = read_env_string("AURA_LOG_LEVEL") {
        config.log_level = level;
    }
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn read_env_u16(name: &str) -> Option<u16> {
    let raw = std::env::var(name).ok().filter(|value| !value.is_empty())?;
    let parsed = parse_u16(&raw);
    if parsed.is_none() {
        warn!("ignoring {name}={raw}: not a valid port");
    }
    parsed
}

fn parse_u16(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8111);
        assert_eq!(config.db_path, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn serde_round_trip() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            db_path: Some(PathBuf::from("/tmp/aura-test.db")),
            log_level: "debug".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ServerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.host, config.host);
        assert_eq!(back.port, config.port);
        assert_eq!(back.db_path, config.db_path);
        assert_eq!(back.log_level, config.log_level);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from_path(&dir.path().join("no-such.json")).unwrap();
        assert_eq!(config.port, 8111);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"port": 9000}"#).unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn full_file_overrides_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"host": "127.0.0.1", "port": 1234, "db_path": "/tmp/x.db", "log_level": "trace"}"#,
        )
        .unwrap();

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 1234);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert!(load_config_from_path(&path).is_err());
    }

    #[test]
    fn deep_merge_replaces_scalars() {
        let mut base = serde_json::json!({"port": 8111, "host": "0.0.0.0"});
        deep_merge(&mut base, serde_json::json!({"port": 9000}));
        assert_eq!(base["port"], 9000);
        assert_eq!(base["host"], "0.0.0.0");
    }

    #[test]
    fn deep_merge_adds_missing_keys() {
        let mut base = serde_json::json!({"port": 8111});
        deep_merge(&mut base, serde_json::json!({"log_level": "debug"}));
        assert_eq!(base["port"], 8111);
        assert_eq!(base["log_level"], "debug");
    }

    #[test]
    fn parse_u16_accepts_valid_ports() {
        assert_eq!(parse_u16("8080"), Some(8080));
        assert_eq!(parse_u16(" 8080 "), Some(8080));
        assert_eq!(parse_u16("0"), Some(0));
    }

    #[test]
    fn parse_u16_rejects_garbage() {
        assert_eq!(parse_u16("abc"), None);
        assert_eq!(parse_u16(""), None);
        assert_eq!(parse_u16("-1"), None);
        assert_eq!(parse_u16("70000"), None);
    }

    #[test]
    fn config_path_ends_with_expected_segments() {
        let path = config_path();
        assert!(path.ends_with(".aura/config.json"));
    }
}
