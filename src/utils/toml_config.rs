//! TOML-based configuration for Pasalku Gateway
//!
//! This module provides declarative configuration for the HTTP server, the
//! backend location, the reachability prober and the relay handlers via a
//! TOML file (`pasalku.toml`). Every field has a default, so an empty file is
//! a valid configuration.
//!
//! # Hot Reloading
//!
//! Configuration changes are automatically detected and applied at runtime.
//! Use `GatewayConfigManager` for thread-safe access to the current configuration.
//!
//! # Backend URL resolution
//!
//! The backend base URL is resolved on every request from two named
//! environment variables and an explicit fallback, so a deployment can point
//! the gateway elsewhere without a restart.

use arc_swap::ArcSwap;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use pasalku_probe::{DEFAULT_BACKEND_URL, ProbeConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Root configuration structure loaded from pasalku.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Reachability prober settings
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Forward-and-relay settings
    #[serde(default)]
    pub relay: RelayConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Log line formatting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            body_limit_bytes: default_body_limit(),
            cors_origins: Vec::new(),
        }
    }
}

// ============= Backend Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Environment variable consulted first for the backend base URL
    #[serde(default = "default_url_env")]
    pub url_env: String,

    /// Environment variable consulted second
    #[serde(default = "default_fallback_url_env")]
    pub fallback_url_env: String,

    /// Base URL used when neither variable is set
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

fn default_url_env() -> String {
    "BACKEND_URL".to_string()
}

fn default_fallback_url_env() -> String {
    "NEXT_PUBLIC_API_URL".to_string()
}

fn default_fallback_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
            fallback_url_env: default_fallback_url_env(),
            fallback_url: default_fallback_url(),
        }
    }
}

impl BackendConfig {
    /// Resolve the backend base URL from the process environment.
    pub fn resolve_base_url(&self) -> String {
        self.resolve_base_url_with(crate::utils::config::non_empty_var)
    }

    /// Resolve the backend base URL with a custom variable lookup.
    ///
    /// Blank values count as unset. The result is never empty.
    pub fn resolve_base_url_with<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(&self.url_env) {
            return url;
        }
        if let Some(url) = lookup(&self.fallback_url_env) {
            return url;
        }
        if self.fallback_url.trim().is_empty() {
            DEFAULT_BACKEND_URL.to_string()
        } else {
            self.fallback_url.clone()
        }
    }
}

// ============= Relay Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Deadline for a single downstream call
    #[serde(default = "default_relay_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_citation_validate_path")]
    pub citation_validate_path: String,

    #[serde(default = "default_language_detect_path")]
    pub language_detect_path: String,
}

fn default_relay_timeout_ms() -> u64 {
    15_000
}

fn default_citation_validate_path() -> String {
    "/api/v1/citations/validate".to_string()
}

fn default_language_detect_path() -> String {
    "/api/v1/translation/detect".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_relay_timeout_ms(),
            citation_validate_path: default_citation_validate_path(),
            language_detect_path: default_language_detect_path(),
        }
    }
}

impl RelayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid probe configuration: {0}")]
    Probe(#[from] pasalku_probe::Error),

    #[error("Watch error: {0}")]
    WatchError(#[from] notify::Error),
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GatewayConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "server.body_limit_bytes must be greater than zero".to_string(),
            ));
        }

        if self.backend.url_env.trim().is_empty() || self.backend.fallback_url_env.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "backend environment variable names must not be empty".to_string(),
            ));
        }

        let fallback = self.backend.fallback_url.trim();
        if !fallback.is_empty() {
            validate_http_url(fallback, "backend.fallback_url")?;
        }

        self.probe.validate()?;

        if self.relay.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "relay.timeout_ms must be greater than zero".to_string(),
            ));
        }

        for (name, path) in [
            ("relay.citation_validate_path", &self.relay.citation_validate_path),
            ("relay.language_detect_path", &self.relay.language_detect_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "{} must start with '/': {}",
                    name, path
                )));
            }
        }

        Ok(())
    }
}

fn validate_http_url(value: &str, field: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is not a valid URL: {}", field, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}

// ============= Hot Reloading Configuration Manager =============

/// Quiet period that coalesces bursts of file events into one reload
const RELOAD_DEBOUNCE_MS: u64 = 300;

/// Reload `path` into `config` once per burst of change signals.
///
/// Each burst is followed by a trailing reload after `debounce`, so the last
/// write in a burst is always picked up. An invalid file keeps the previous
/// snapshot.
async fn reload_on_change(
    mut rx: mpsc::UnboundedReceiver<()>,
    path: PathBuf,
    config: Arc<ArcSwap<GatewayConfig>>,
    debounce: Duration,
) {
    while rx.recv().await.is_some() {
        loop {
            tokio::time::sleep(debounce).await;
            let mut pending = false;
            while rx.try_recv().is_ok() {
                pending = true;
            }
            if !pending {
                break;
            }
        }

        match GatewayConfig::load(&path) {
            Ok(new_config) => {
                config.store(Arc::new(new_config));
                info!("Configuration hot-reloaded successfully");
            }
            Err(e) => {
                warn!(
                    "Failed to hot-reload config: {}. Keeping previous config.",
                    e
                );
            }
        }
    }
}

/// Thread-safe configuration manager with hot reloading support
pub struct GatewayConfigManager {
    config: Arc<ArcSwap<GatewayConfig>>,
    config_path: Option<PathBuf>,
    watcher: RwLock<Option<RecommendedWatcher>>,
}

impl GatewayConfigManager {
    /// Create a new configuration manager and load the initial config
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        // Convert to absolute path for reliable file watching
        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(ConfigError::ReadError)?
                .join(path)
        };

        let config = GatewayConfig::load(&path)?;

        Ok(Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: Some(path),
            watcher: RwLock::new(None),
        })
    }

    /// Create a config manager directly from a config (useful for testing).
    /// This won't have file watching capabilities.
    pub fn from_config(config: GatewayConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            config_path: None,
            watcher: RwLock::new(None),
        }
    }

    /// Get the current configuration (lockless read)
    pub fn config(&self) -> Arc<GatewayConfig> {
        self.config.load_full()
    }

    /// Path the configuration was loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Replace the current configuration after validating it
    pub fn replace(&self, config: GatewayConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config.store(Arc::new(config));
        Ok(())
    }

    /// Manually reload the configuration from disk
    pub fn reload(&self) -> Result<(), ConfigError> {
        let Some(path) = self.config_path.as_ref() else {
            return Err(ConfigError::ValidationError(
                "configuration was not loaded from a file".to_string(),
            ));
        };

        info!("Reloading configuration from {:?}", path);

        let new_config = GatewayConfig::load(path)?;
        self.config.store(Arc::new(new_config));

        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Start watching for configuration file changes
    pub fn start_watching(&self) -> Result<(), ConfigError> {
        let Some(config_path) = self.config_path.clone() else {
            debug!("No configuration file to watch");
            return Ok(());
        };

        let (tx, rx) = mpsc::unbounded_channel::<()>();
        let config_arc = Arc::clone(&self.config);
        let file_name = config_path.file_name().map(|n| n.to_os_string());

        // Create debounced file watcher
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config && (event.kind.is_modify() || event.kind.is_create()) {
                        // Send reload signal (debounced in the receiver)
                        let _ = tx.send(());
                    }
                }
                Err(e) => {
                    error!("Config watcher error: {:?}", e);
                }
            }
        })?;

        // Watch the config file's parent directory
        if let Some(parent) = config_path.parent() {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }

        *self.watcher.write() = Some(watcher);

        tokio::spawn(reload_on_change(
            rx,
            config_path,
            config_arc,
            Duration::from_millis(RELOAD_DEBOUNCE_MS),
        ));

        info!("Configuration hot-reload watcher started");
        Ok(())
    }

    /// Stop watching for configuration changes
    pub fn stop_watching(&self) {
        *self.watcher.write() = None;
        info!("Configuration hot-reload watcher stopped");
    }
}
