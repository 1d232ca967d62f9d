//! CLI module for Pasalku Gateway
//!
//! Provides command-line interface parsing and handling for the pasalku-gateway binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;
pub mod probe;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pasalku Gateway - backend reachability prober and JSON relay
///
/// Sits between the Pasalku.ai frontend and the legal-reasoning backend.
#[derive(Parser, Debug)]
#[command(
    name = "pasalku-gateway",
    author = "Pasalku.ai <dev@pasalku.ai>",
    version,
    about = "Pasalku Gateway - backend reachability prober and JSON relay",
    long_about = "Pasalku Gateway - sits between the Pasalku.ai frontend and the legal-reasoning backend.\n\
                  Reports which backend flavour is reachable and relays citation\n\
                  validation and language detection calls.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a config.",
    after_help = "EXAMPLES:\n    \
                  pasalku-gateway init                      # Scaffold pasalku.toml\n    \
                  pasalku-gateway                           # Start the server\n    \
                  pasalku-gateway probe                     # Check the configured backend once\n    \
                  pasalku-gateway probe --url http://b:8000 # Check another backend\n    \
                  pasalku-gateway --config my.toml          # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "pasalku.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Probe the backend once and print the report
    ///
    /// Exits with status 0 when a backend answered and 2 otherwise.
    Probe {
        /// Backend base URL (defaults to the configured resolution)
        #[arg(long)]
        url: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Per-attempt timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Show configuration information
    Config {
        /// Show the full configuration
        #[arg(short = 'f', long)]
        full: bool,

        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Scaffold pasalku.toml and .env.example
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Backend base URL written as the fallback
        #[arg(long, default_value = pasalku_probe::DEFAULT_BACKEND_URL)]
        backend_url: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
