//! Environment-driven overrides.
//!
//! `.env` files are loaded once at startup; after that the process
//! environment is consulted directly so values can change between requests.

use crate::utils::toml_config::GatewayConfig;
use std::env;

/// Host override for the listening address
pub const HOST_ENV: &str = "PASALKU_HOST";

/// Port override for the listening address
pub const PORT_ENV: &str = "PASALKU_PORT";

/// Load a `.env` file from the working directory if there is one.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Read an environment variable, treating blank values as unset.
pub fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Apply `PASALKU_HOST` / `PASALKU_PORT` on top of a loaded configuration.
pub fn apply_env_overrides(config: &mut GatewayConfig) -> Result<(), std::num::ParseIntError> {
    apply_overrides_with(config, non_empty_var)
}

/// Same as [`apply_env_overrides`] with a custom variable lookup.
pub fn apply_overrides_with<F>(
    config: &mut GatewayConfig,
    lookup: F,
) -> Result<(), std::num::ParseIntError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(HOST_ENV) {
        config.server.host = host;
    }
    if let Some(port) = lookup(PORT_ENV) {
        config.server.port = port.parse()?;
    }
    Ok(())
}
