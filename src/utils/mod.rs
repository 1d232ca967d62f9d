//! Configuration utilities.

/// Environment variable helpers and overrides.
pub mod config;
/// TOML configuration file and hot-reload manager.
pub mod toml_config;
/// Tracing subscriber setup.
pub mod logging;
