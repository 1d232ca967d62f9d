//! CLI Integration Tests for Pasalku Gateway
//!
//! Runs the built binary for the init, config and probe commands.

use std::fs;
use std::process::Command;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to get the path to the built binary
fn get_binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_pasalku-gateway")
}

/// Helper to run pasalku-gateway with arguments
fn run_gateway(args: &[&str], working_dir: Option<&std::path::Path>) -> std::process::Output {
    let mut cmd = Command::new(get_binary_path());
    cmd.args(args).arg("--no-color");

    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    cmd.output().expect("Failed to execute command")
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = run_gateway(&["--help"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Pasalku Gateway"));
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("probe"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("init"));
}

#[test]
fn test_version_command() {
    let output = run_gateway(&["--version"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pasalku-gateway"));
}

#[test]
fn test_probe_help() {
    let output = run_gateway(&["probe", "--help"], None);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--url"));
    assert!(stdout.contains("--json"));
    assert!(stdout.contains("--timeout-ms"));
}

// =============================================================================
// Init Command Tests
// =============================================================================

#[test]
fn test_init_creates_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().to_str().unwrap();

    let output = run_gateway(&["init", temp_path, "--port", "8181"], None);
    assert!(output.status.success(), "Init command failed: {:?}", output);

    let content = fs::read_to_string(temp_dir.path().join("pasalku.toml"))
        .expect("Failed to read pasalku.toml");
    assert!(content.contains("[server]"));
    assert!(content.contains("port = 8181"));
    assert!(content.contains("[[probe.targets]]"));
    assert!(temp_dir.path().join(".env.example").exists());
}

#[test]
fn test_init_twice_without_force_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().to_str().unwrap();

    assert!(run_gateway(&["init", temp_path], None).status.success());

    let output = run_gateway(&["init", temp_path], None);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already exists"));

    let output = run_gateway(&["init", temp_path, "--force"], None);
    assert!(output.status.success());
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_validate_generated_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().to_str().unwrap();
    assert!(run_gateway(&["init", temp_path], None).status.success());

    let output = run_gateway(&["config", "--validate"], Some(temp_dir.path()));

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_config_validate_rejects_bad_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("pasalku.toml"),
        "[probe]\ntimeout_ms = 0\n",
    )
    .unwrap();

    let output = run_gateway(&["config", "--validate"], Some(temp_dir.path()));

    assert!(!output.status.success());
}

#[test]
fn test_config_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_gateway(&["config"], Some(temp_dir.path()));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_config_full_prints_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path().to_str().unwrap();
    assert!(run_gateway(&["init", temp_path], None).status.success());

    let output = run_gateway(&["config", "--full"], Some(temp_dir.path()));

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[relay]"));
    assert!(stdout.contains("citation_validate_path"));
}

// =============================================================================
// Probe Command Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_probe_connected_exits_zero() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let uri = backend.uri();
    let output = run_gateway(&["probe", "--url", &uri, "--json"], Some(temp_dir.path()));

    assert!(output.status.success(), "{:?}", output);
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("probe --json should print JSON");
    assert_eq!(report["connected"], true);
    assert_eq!(report["kind"], "real");
    assert_eq!(report["url"], uri);
}

#[test]
fn test_probe_unreachable_exits_two() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_gateway(
        &["probe", "--url", "http://127.0.0.1:1", "--timeout-ms", "500"],
        Some(temp_dir.path()),
    );

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("http://127.0.0.1:1/api/health"));
    assert!(stdout.contains("http://127.0.0.1:1/health"));
}
