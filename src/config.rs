//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Backend address used by the reference deployment
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Storage key holding the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// Redirect to the sign-in page when no token is stored
    #[serde(default)]
    pub require_sign_in: bool,
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            require_sign_in: false,
        }
    }
}

/// Local storage configuration (native token store)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    #[cfg(feature = "native")]
    {
        dirs::data_local_dir()
            .map(|p| p.join("clinica").to_string_lossy().to_string())
            .unwrap_or_else(|| "./clinica_data".to_string())
    }
    #[cfg(not(feature = "native"))]
    {
        "./clinica_data".to_string()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("clinica").join("config.toml")),
            Some(PathBuf::from("/etc/clinica/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Path of the native token file
    pub fn token_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.dir).join(&self.auth.token_key)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(url) = lookup("CLINICA_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("CLINICA_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        // Auth overrides
        if let Some(key) = lookup("CLINICA_TOKEN_KEY") {
            self.auth.token_key = key;
        }
        if let Some(flag) = lookup("CLINICA_REQUIRE_SIGN_IN") {
            self.auth.require_sign_in = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        // Storage overrides
        if let Some(dir) = lookup("CLINICA_STORAGE_DIR") {
            self.storage.dir = dir;
        }

        // Logging overrides
        if let Some(level) = lookup("CLINICA_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CLINICA_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Clinica Configuration
#
# Environment variables override these settings:
# - CLINICA_API_URL
# - CLINICA_API_TIMEOUT
# - CLINICA_TOKEN_KEY
# - CLINICA_REQUIRE_SIGN_IN
# - CLINICA_STORAGE_DIR
# - CLINICA_LOG_LEVEL
# - CLINICA_LOG_FORMAT

[api]
# Backend base address
base_url = "http://127.0.0.1:8000"

# Request timeout in seconds
request_timeout_secs = 30

[auth]
# Storage key holding the bearer token
token_key = "token"

# Send users without a stored token to /signin
require_sign_in = false

[storage]
# Directory for the token file
# dir = "~/.local/share/clinica"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_reference_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.auth.token_key, "token");
        assert!(!config.auth.require_sign_in);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.auth.token_key, DEFAULT_TOKEN_KEY);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[api]\nbase_url = \"http://backend:9000\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.auth.token_key, "token");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[auth]\nrequire_sign_in = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.auth.require_sign_in);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CLINICA_API_URL", "https://api.example.org"),
            ("CLINICA_API_TIMEOUT", "5"),
            ("CLINICA_TOKEN_KEY", "jwt"),
            ("CLINICA_REQUIRE_SIGN_IN", "true"),
            ("CLINICA_STORAGE_DIR", "/tmp/clinica"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://api.example.org");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.auth.token_key, "jwt");
        assert!(config.auth.require_sign_in);
        assert_eq!(config.token_path(), PathBuf::from("/tmp/clinica/jwt"));
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "CLINICA_API_TIMEOUT").then(|| "soon".to_string()));
        assert_eq!(config.api.request_timeout_secs, 30);
    }
}
