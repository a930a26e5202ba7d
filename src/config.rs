//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::backend::BackendConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analysis backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Sent as `use_agent` on chat requests when set
    #[serde(default)]
    pub use_agent: Option<bool>,

    /// Where `ask` and the console save inline chat graphs
    #[serde(default = "default_graph_dir")]
    pub graph_dir: String,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_graph_dir() -> String {
    std::env::temp_dir()
        .join("qpu-console")
        .to_string_lossy()
        .to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
            use_agent: None,
            graph_dir: default_graph_dir(),
        }
    }
}

impl BackendSettings {
    /// Client configuration for these settings
    pub fn client_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.url.clone(),
            request_timeout_ms: self.request_timeout_secs * 1000,
            use_agent: self.use_agent,
        }
    }
}

/// Web UI host configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the built web UI (index.html + wasm bundle)
    #[serde(default = "default_ui_dir")]
    pub ui_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8084
}

fn default_ui_dir() -> String {
    "./qpu-ui/dist".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ui_dir: default_ui_dir(),
        }
    }
}

impl ServerSettings {
    /// Socket address string to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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
    "warn".to_string()
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
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

    /// Candidate config file locations, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            Some(PathBuf::from("./qpu-console.toml")),
            dirs::config_dir().map(|p| p.join("qpu-console").join("config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Backend overrides
        if let Some(url) = var("QPU_CONSOLE_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(secs) = var("QPU_CONSOLE_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.backend.request_timeout_secs = secs;
        }
        if let Some(dir) = var("QPU_CONSOLE_GRAPH_DIR") {
            self.backend.graph_dir = dir;
        }

        // Server overrides
        if let Some(host) = var("QPU_CONSOLE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("QPU_CONSOLE_PORT").and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }
        if let Some(ui_dir) = var("QPU_CONSOLE_UI_DIR") {
            self.server.ui_dir = ui_dir;
        }

        // Logging overrides
        if let Some(level) = var("QPU_CONSOLE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("QPU_CONSOLE_LOG_FORMAT") {
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
    r#"# QPU Console Configuration
#
# Environment variables override these settings:
# - QPU_CONSOLE_BACKEND_URL
# - QPU_CONSOLE_TIMEOUT_SECS
# - QPU_CONSOLE_GRAPH_DIR
# - QPU_CONSOLE_HOST
# - QPU_CONSOLE_PORT
# - QPU_CONSOLE_UI_DIR
# - QPU_CONSOLE_LOG_LEVEL
# - QPU_CONSOLE_LOG_FORMAT

[backend]
# Analysis backend base URL (serves /api/chat, /api/summary, ...)
url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 60

# Route chat requests through the backend agent (omit to use the backend default)
# use_agent = true

# Directory for graphs attached to chat replies
# graph_dir = "/tmp/qpu-console"

[server]
# Host and port for `qpu-console serve`
host = "127.0.0.1"
port = 8084

# Built web UI assets
ui_dir = "./qpu-ui/dist"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.url, "http://localhost:8000");
        assert_eq!(config.backend.request_timeout_secs, 60);
        assert_eq!(config.server.addr(), "127.0.0.1:8084");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.backend.url, defaults.backend.url);
        assert_eq!(config.backend.use_agent, None);
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.server.ui_dir, defaults.server.ui_dir);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nurl = \"http://qpu:9000\"\nuse_agent = false\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.backend.url, "http://qpu:9000");
        assert_eq!(config.backend.use_agent, Some(false));
        assert_eq!(config.backend.request_timeout_secs, 60);
        assert_eq!(config.server.port, 8084);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[backend\nurl = 1").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QPU_CONSOLE_BACKEND_URL", "http://backend:8000"),
            ("QPU_CONSOLE_TIMEOUT_SECS", "5"),
            ("QPU_CONSOLE_PORT", "not-a-port"),
            ("QPU_CONSOLE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.url, "http://backend:8000");
        assert_eq!(config.backend.request_timeout_secs, 5);
        // Unparseable values are ignored
        assert_eq!(config.server.port, 8084);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_client_config() {
        let settings = BackendSettings {
            request_timeout_secs: 3,
            use_agent: Some(true),
            ..Default::default()
        };
        let client = settings.client_config();
        assert_eq!(client.request_timeout_ms, 3000);
        assert_eq!(client.use_agent, Some(true));
    }
}
