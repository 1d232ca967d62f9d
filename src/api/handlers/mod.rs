//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Assistant avatar state handlers.
pub mod assistant;
/// Citation validation relay.
pub mod citations;
/// Gateway liveness and fallback handlers.
pub mod health;
/// Backend status probe handler.
pub mod status;
/// Language detection relay.
pub mod translation;
