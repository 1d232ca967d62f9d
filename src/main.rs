//! Pasalku Gateway entry point
//!
//! - `pasalku-gateway` / `pasalku-gateway serve` - start the HTTP server
//! - `pasalku-gateway probe` - probe the backend once
//! - `pasalku-gateway config` - show or validate the configuration
//! - `pasalku-gateway init` - scaffold pasalku.toml and .env.example

use anyhow::Context;
use owo_colors::OwoColorize;
use pasalku::{
    AppState, GatewayConfig, GatewayConfigManager,
    cli::{
        Cli, Commands,
        init::{self, InitConfig, InitResult},
        output::Output,
        probe::{self, ProbeArgs},
    },
    utils::{config, logging},
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match run(cli, &output).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output: &Output) -> anyhow::Result<ExitCode> {
    match cli.command {
        None | Some(Commands::Serve) => {
            serve(&cli.config, cli.verbose, output).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Probe {
            url,
            json,
            timeout_ms,
        }) => {
            let config = load_or_default(&cli.config)?;
            if cli.verbose {
                logging::init(&config.server);
            }
            let args = ProbeArgs {
                url,
                json,
                timeout_ms,
            };
            let status = probe::run(&config, &args, output).await?;
            Ok(ExitCode::from(status))
        }
        Some(Commands::Config { full, validate }) => show_config(&cli.config, full, validate, output),
        Some(Commands::Init {
            path,
            force,
            host,
            port,
            backend_url,
        }) => {
            let result = init::run(
                InitConfig {
                    path,
                    force,
                    host,
                    port,
                    backend_url,
                },
                output,
            );
            Ok(match result {
                InitResult::Success => ExitCode::SUCCESS,
                InitResult::AlreadyExists | InitResult::Error(_) => ExitCode::FAILURE,
            })
        }
    }
}

/// Start the server and block until Ctrl-C.
async fn serve(config_path: &Path, verbose: bool, output: &Output) -> anyhow::Result<()> {
    let manager = if config_path.exists() {
        GatewayConfigManager::new(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
    } else {
        GatewayConfigManager::from_config(GatewayConfig::default())
    };
    let manager = Arc::new(manager);

    let mut startup = (*manager.config()).clone();
    config::apply_env_overrides(&mut startup).context("invalid PASALKU_PORT")?;

    logging::init(&startup.server);

    if verbose {
        output.banner();
    }

    if manager.config_path().is_none() {
        tracing::warn!(
            path = %config_path.display(),
            "configuration file not found, using defaults"
        );
    }

    if let Err(e) = manager.start_watching() {
        tracing::warn!("Failed to start config watcher: {}", e);
    }

    let state = AppState::new(Arc::clone(&manager)).context("failed to build application state")?;

    tracing::info!(
        backend = %startup.backend.resolve_base_url(),
        "backend base URL resolved"
    );

    let app = pasalku::api::routes::app(state);

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        app.merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/swagger.json", pasalku::api::docs::ApiDoc::openapi()),
        )
    };

    let addr = format!("{}:{}", startup.server.host, startup.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Pasalku Gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    manager.stop_watching();
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn load_or_default(path: &Path) -> anyhow::Result<GatewayConfig> {
    if path.exists() {
        GatewayConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
    } else {
        Ok(GatewayConfig::default())
    }
}

fn show_config(
    path: &Path,
    full: bool,
    validate: bool,
    output: &Output,
) -> anyhow::Result<ExitCode> {
    let config = match GatewayConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            output.hint("Run 'pasalku-gateway init' to create one");
            return Ok(ExitCode::FAILURE);
        }
    };

    if validate {
        output.success(&format!("{} is valid", path.display()));
        return Ok(ExitCode::SUCCESS);
    }

    if full {
        println!("{}", config.to_toml_string()?);
        return Ok(ExitCode::SUCCESS);
    }

    output.header("Configuration");
    output.kv("file", &path.display().to_string());
    output.kv(
        "listen",
        &format!("{}:{}", config.server.host, config.server.port),
    );
    output.kv("backend", &config.backend.resolve_base_url());
    output.kv("probe timeout", &format!("{}ms", config.probe.timeout_ms));
    output.kv("relay timeout", &format!("{}ms", config.relay.timeout_ms));

    output.subheader("Probe targets");
    for target in &config.probe.targets {
        output.list_item(&format!("{} {}", target.kind, target.path));
    }

    Ok(ExitCode::SUCCESS)
}
