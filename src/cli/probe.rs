//! Probe command implementation
//!
//! Runs a single probe cycle from the command line, outside the server.

use super::output::Output;
use crate::types::{AppError, Result};
use crate::utils::toml_config::GatewayConfig;
use pasalku_probe::{HealthClient, ReqwestHealthClient, StatusReport};
use std::time::Duration;

/// Exit status when no backend answered
pub const NOT_CONNECTED_EXIT: u8 = 2;

/// Options for the probe command
#[derive(Debug, Default)]
pub struct ProbeArgs {
    /// Backend base URL; the configured resolution is used when absent
    pub url: Option<String>,
    /// Print the report as JSON instead of text
    pub json: bool,
    /// Per-attempt timeout override
    pub timeout_ms: Option<u64>,
}

/// Probe once with the production client and print the report.
pub async fn run(config: &GatewayConfig, args: &ProbeArgs, output: &Output) -> Result<u8> {
    let client = ReqwestHealthClient::new(&config.probe.user_agent)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let report = probe_with(config, args, &client).await?;
    print_report(&report, args.json, output)?;

    Ok(exit_status(&report))
}

/// Apply the command-line overrides and run one probe cycle.
pub async fn probe_with(
    config: &GatewayConfig,
    args: &ProbeArgs,
    client: &dyn HealthClient,
) -> Result<StatusReport> {
    let mut probe = config.probe.clone();
    if let Some(timeout_ms) = args.timeout_ms {
        probe = probe.with_timeout(Duration::from_millis(timeout_ms));
    }
    probe
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let base_url = match &args.url {
        Some(url) if !url.trim().is_empty() => url.clone(),
        _ => config.backend.resolve_base_url(),
    };

    Ok(pasalku_probe::probe_backend(&base_url, &probe, client).await)
}

fn print_report(report: &StatusReport, json: bool, output: &Output) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(report)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        println!("{}", body);
    } else {
        output.report(report);
    }
    Ok(())
}

/// `0` when a backend answered, [`NOT_CONNECTED_EXIT`] otherwise.
pub fn exit_status(report: &StatusReport) -> u8 {
    if report.connected {
        0
    } else {
        NOT_CONNECTED_EXIT
    }
}
