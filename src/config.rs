use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::persistence::DEFAULT_STORAGE_KEY;
use crate::wizard::UserIdentity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Signed-in user used to pre-fill contact fields
    #[serde(default)]
    pub identity: UserIdentity,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Onboarding submission endpoint (POST, JSON body)
    pub endpoint: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_submission_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_submission_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("onboard/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Mirror in-progress answers to disk for reload recovery
    #[serde(default = "default_persistence_enabled")]
    pub enabled: bool,
    /// Snapshot file name (without extension) inside the state directory
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_persistence_enabled() -> bool {
    true
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: default_persistence_enabled(),
            storage_key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

fn default_tick_rate() -> u64 {
    250
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Project-local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(".onboard/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so onboard works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // User config in ~/.config/onboard/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("onboard").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables, e.g. ONBOARD__SUBMISSION__ENDPOINT
        builder = builder.add_source(
            config::Environment::with_prefix("ONBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save config to .onboard/config.toml
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::local_config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        std::fs::write(&config_path, toml_str).context("Failed to write config file")?;

        Ok(config_path)
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }

    /// Identity for pre-filling, if any field is set
    pub fn identity(&self) -> Option<&UserIdentity> {
        if self.identity.is_empty() {
            None
        } else {
            Some(&self.identity)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submission: SubmissionConfig {
                endpoint: "http://localhost:3000/api/onboarding/brand".to_string(),
                timeout_secs: default_submission_timeout(),
                user_agent: default_user_agent(),
            },
            persistence: PersistenceConfig::default(),
            paths: PathsConfig {
                state: ".onboard".to_string(), // Relative to cwd
            },
            logging: LoggingConfig::default(),
            identity: UserIdentity::default(),
            ui: UiConfig::default(),
        }
    }
}
