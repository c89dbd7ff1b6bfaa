//! Configuration module for docguard.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for docguard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
}

/// Record store settings (simulated latency and seed data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Delay applied to every fetch, in milliseconds.
    pub fetch_latency_ms: u64,
    /// Delay applied to every update, in milliseconds.
    pub update_latency_ms: u64,
    /// One-off delay paid when the store is opened, in milliseconds.
    pub connect_latency_ms: u64,
    /// YAML file with the records to load. `None` uses the built-in sample set.
    pub seed_file: Option<PathBuf>,
}

/// Access gateway settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Deadline for a single store call, in milliseconds. `None` waits forever.
    pub store_timeout_ms: Option<u64>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl StoreConfig {
    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    pub fn update_latency(&self) -> Duration {
        Duration::from_millis(self.update_latency_ms)
    }

    pub fn connect_latency(&self) -> Duration {
        Duration::from_millis(self.connect_latency_ms)
    }
}

impl GatewayConfig {
    pub fn store_timeout(&self) -> Option<Duration> {
        self.store_timeout_ms.map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/docguard/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("docguard")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fetch_latency_ms: 500,
            update_latency_ms: 300,
            connect_latency_ms: 1000,
            seed_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"gateway.store_timeout_ms"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for any simulated latency.
const MAX_LATENCY_MS: u64 = 60_000;

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- store ---
        for (field, value) in [
            ("store.fetch_latency_ms", self.store.fetch_latency_ms),
            ("store.update_latency_ms", self.store.update_latency_ms),
            ("store.connect_latency_ms", self.store.connect_latency_ms),
        ] {
            if value > MAX_LATENCY_MS {
                errors.push(ValidationError {
                    field: field.into(),
                    message: format!("must not exceed {MAX_LATENCY_MS}"),
                });
            }
        }
        if let Some(seed) = &self.store.seed_file {
            if !seed.exists() {
                errors.push(ValidationError {
                    field: "store.seed_file".into(),
                    message: format!("file does not exist: {}", seed.display()),
                });
            }
        }

        // --- gateway ---
        if self.gateway.store_timeout_ms == Some(0) {
            errors.push(ValidationError {
                field: "gateway.store_timeout_ms".into(),
                message: "must be greater than 0 when set".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use docguard_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .store_fetch_latency_ms(0)
///     .gateway_store_timeout_ms(250)
///     .logging_level("debug")
///     .build();
/// assert_eq!(config.gateway.store_timeout_ms, Some(250));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- store ---

    pub fn store_fetch_latency_ms(mut self, ms: u64) -> Self {
        self.config.store.fetch_latency_ms = ms;
        self
    }

    pub fn store_update_latency_ms(mut self, ms: u64) -> Self {
        self.config.store.update_latency_ms = ms;
        self
    }

    pub fn store_connect_latency_ms(mut self, ms: u64) -> Self {
        self.config.store.connect_latency_ms = ms;
        self
    }

    pub fn store_seed_file(mut self, path: PathBuf) -> Self {
        self.config.store.seed_file = Some(path);
        self
    }

    // --- gateway ---

    pub fn gateway_store_timeout_ms(mut self, ms: u64) -> Self {
        self.config.gateway.store_timeout_ms = Some(ms);
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
