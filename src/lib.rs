//! # Pasalku Gateway
//!
//! The thin service between the Pasalku.ai frontend and the external
//! legal-reasoning backend.
//!
//! ## Overview
//!
//! The gateway does three things:
//!
//! 1. **Backend status** - probes the configured backend (full backend first,
//!    minimal/mock backend second) and reports which one answered. The status
//!    endpoint always answers `200`; `connected` carries the signal.
//! 2. **Relays** - citation validation and language detection requests are
//!    checked for their one required field and forwarded unchanged to the
//!    backend, whose JSON answer is relayed back.
//! 3. **Assistant state** - keeps the avatar's active character and status.
//!
//! Pasalku Gateway can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `pasalku-gateway` binary
//! 2. **As a library** - Build the router into your own axum application
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use pasalku::{AppState, GatewayConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let state = AppState::from_config(GatewayConfig::default())?;
//!     let app = pasalku::api::routes::app(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`relay`] - Forward-and-relay client and error policy
//! - [`assistant`] - Assistant avatar state container
//! - [`cli`] - Command-line interface
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging
//!
//! The probing core lives in the `pasalku-probe` crate and is re-exported
//! here as [`probe`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Assistant avatar state.
pub mod assistant;
/// Command-line interface.
pub mod cli;
/// Forward-and-relay handlers' shared machinery.
pub mod relay;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

/// Backend reachability probing.
pub use pasalku_probe as probe;

// Re-export commonly used types
pub use assistant::{AssistantState, AssistantStatus, AssistantStore};
pub use pasalku_probe::{BackendKind, StatusReport};
pub use relay::{RelayClient, RelayError};
pub use types::{AppError, Result};
pub use utils::toml_config::{GatewayConfig, GatewayConfigManager};

use pasalku_probe::{HealthClient, ReqwestHealthClient};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// TOML-based configuration with hot-reload support
    pub config_manager: Arc<GatewayConfigManager>,
    /// Client used for backend health probes
    pub health_client: Arc<dyn HealthClient>,
    /// Client used for relay calls
    pub relay_client: Arc<RelayClient>,
    /// Assistant avatar state
    pub assistant: Arc<AssistantStore>,
}

impl AppState {
    /// Build state around an existing config manager with production clients
    pub fn new(config_manager: Arc<GatewayConfigManager>) -> Result<Self> {
        let config = config_manager.config();

        let health_client = ReqwestHealthClient::new(&config.probe.user_agent)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let relay_client = RelayClient::new()
            .map_err(|e| AppError::Internal(format!("Failed to create relay client: {}", e)))?;

        Ok(Self {
            config_manager,
            health_client: Arc::new(health_client),
            relay_client: Arc::new(relay_client),
            assistant: Arc::new(AssistantStore::new()),
        })
    }

    /// Build state from a config without file watching
    pub fn from_config(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        Self::new(Arc::new(GatewayConfigManager::from_config(config)))
    }

    /// Replace the health client (used by tests and embedders)
    pub fn with_health_client(mut self, client: Arc<dyn HealthClient>) -> Self {
        self.health_client = client;
        self
    }
}
