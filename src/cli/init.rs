//! Init command implementation
//!
//! Scaffolds `pasalku.toml` and `.env.example` for a new gateway deployment.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// pasalku.toml already exists and --force was not given
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
    /// Backend base URL used when no environment variable is set
    pub backend_url: String,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Pasalku Gateway");

    let base_path = &config.path;

    let config_path = base_path.join("pasalku.toml");
    if config_path.exists() && !config.force {
        output.warning("pasalku.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    if !base_path.exists() {
        if let Err(e) = fs::create_dir_all(base_path) {
            output.error(&format!("Failed to create {}: {}", base_path.display(), e));
            return InitResult::Error(e.to_string());
        }
    }

    output.subheader("Creating configuration files");

    let toml_content = generate_pasalku_toml(&config);
    if let Err(e) = write_file(&config_path, &toml_content, config.force) {
        output.error(&format!("Failed to create pasalku.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "pasalku.toml");

    let env_example_path = base_path.join(".env.example");
    if env_example_path.exists() && !config.force {
        output.skipped(".env.example", "already exists");
    } else {
        if let Err(e) = write_file(&env_example_path, &generate_env_example(&config), true) {
            output.error(&format!("Failed to create .env.example: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("env", ".env.example");
    }

    output.complete("Pasalku Gateway initialized");

    output.header("Next Steps");
    output.info("1. Point the gateway at your backend:");
    output.command("cp .env.example .env");
    output.command("# Edit BACKEND_URL in .env");
    output.newline();
    output.info("2. Check the backend is reachable:");
    output.command("pasalku-gateway probe");
    output.newline();
    output.info("3. Start the server:");
    output.command("pasalku-gateway");

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));
    output.hint("API docs available at /swagger-ui/ (requires 'swagger-ui' feature)");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(());
    }
    fs::write(path, content)
}

fn generate_pasalku_toml(config: &InitConfig) -> String {
    format!(
        r#"# Pasalku Gateway configuration
# Every field is optional; the values below are the defaults.

[server]
host = "{host}"
port = {port}
log_level = "info"        # RUST_LOG takes precedence
log_format = "pretty"     # or "json"
body_limit_bytes = 1048576
cors_origins = []         # empty allows any origin

[backend]
# The base URL is read from these variables on every request,
# falling back to fallback_url when neither is set.
url_env = "BACKEND_URL"
fallback_url_env = "NEXT_PUBLIC_API_URL"
fallback_url = "{backend_url}"

[probe]
timeout_ms = 3000

# Tried in order; the first 2xx wins.
[[probe.targets]]
kind = "real"
path = "/api/health"

[[probe.targets]]
kind = "mock"
path = "/health"

[relay]
timeout_ms = 15000
citation_validate_path = "/api/v1/citations/validate"
language_detect_path = "/api/v1/translation/detect"
"#,
        host = config.host,
        port = config.port,
        backend_url = config.backend_url,
    )
}

fn generate_env_example(config: &InitConfig) -> String {
    format!(
        r#"# Pasalku Gateway Environment Variables
# Copy this file to .env and fill in the values.

# Backend base URL (checked first)
BACKEND_URL={backend_url}

# Frontend-shared backend URL (checked when BACKEND_URL is unset)
# NEXT_PUBLIC_API_URL=

# Optional: override the listen address from pasalku.toml
# PASALKU_HOST={host}
# PASALKU_PORT={port}

# Optional: Logging level (trace, debug, info, warn, error)
RUST_LOG=info,pasalku=debug,pasalku_probe=debug
"#,
        backend_url = config.backend_url,
        host = config.host,
        port = config.port,
    )
}
