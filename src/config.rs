//! Client configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable overriding the server URL.
pub const SERVER_URL_ENV: &str = "TICTACTOE_SERVER_URL";

/// Settings for the terminal client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Game server endpoint (`ws://` or `wss://`).
    #[serde(default = "default_server_url")]
    server_url: String,

    /// File receiving the client's logs.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Input poll interval and spinner speed, in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    tick_rate_ms: u64,

    /// How long a move or close may wait on the server, in milliseconds.
    #[serde(default = "default_send_timeout_ms")]
    send_timeout_ms: u64,
}

fn default_server_url() -> String {
    "ws://127.0.0.1:8080/play".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe_client.log")
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_send_timeout_ms() -> u64 {
    5_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            log_file: default_log_file(),
            tick_rate_ms: default_tick_rate_ms(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(server_url = %config.server_url, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the effective configuration.
    ///
    /// Layers from lowest to highest precedence: defaults, the TOML file at
    /// `config_path` (skipped when absent), the environment's server URL, the
    /// command line's server URL.
    #[instrument(skip(config_path), fields(config_path = %config_path.as_ref().display()))]
    pub fn resolve(
        config_path: impl AsRef<Path>,
        env_server_url: Option<String>,
        cli_server_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            Self::from_file(config_path)?
        } else {
            debug!("No config file, using defaults");
            Self::default()
        };

        if let Some(url) = env_server_url {
            debug!("Server URL overridden by environment");
            config = config.with_server_url(url)?;
        }
        if let Some(url) = cli_server_url {
            debug!("Server URL overridden by command line");
            config = config.with_server_url(url)?;
        }

        Ok(config)
    }

    /// Replaces the server URL after validating it.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.server_url = server_url.into();
        self.validate()?;
        Ok(self)
    }

    /// Replaces the log file path.
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("ws://") || self.server_url.starts_with("wss://")) {
            return Err(ConfigError::new(format!(
                "Server URL must start with ws:// or wss://, got {}",
                self.server_url
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::new("tick_rate_ms must be positive"));
        }
        if self.send_timeout_ms == 0 {
            return Err(ConfigError::new("send_timeout_ms must be positive"));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
