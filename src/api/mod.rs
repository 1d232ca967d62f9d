//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Pasalku Gateway, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::docs`](crate::api::docs) - OpenAPI document
//!
//! # API Endpoints
//!
//! ## Backend status (`/api/status`)
//! - `GET /api/status` - Probe the backend and report reachability
//! - `GET /api/backend-status` - Alias of `/api/status`
//!
//! ## Relays
//! - `POST /api/citations/validate` - Forward to `/api/v1/citations/validate`
//! - `POST /api/translation/detect` - Forward to `/api/v1/translation/detect`
//!
//! ## Assistant (`/api/assistant`)
//! - `GET /api/assistant/state` - Current avatar character and status
//! - `PUT /api/assistant/state` - Partially update the avatar state
//! - `DELETE /api/assistant/state` - Reset to defaults
//!
//! ## Health (`/health`)
//! - `GET /health` - Gateway liveness (does not touch the backend)
//!
//! # OpenAPI Documentation
//!
//! The document is served at `/api-docs/openapi.json`. When the `swagger-ui`
//! feature is enabled, interactive API documentation is available at
//! `/swagger-ui/`.

/// OpenAPI document.
pub mod docs;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
