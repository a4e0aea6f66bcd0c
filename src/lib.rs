// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Home Hub Exporter
//!
//! Prometheus exporter for BT Home Hub (Sagemcom) routers.
//!
//! This library logs in to the router's JSON API, reads its summary
//! statistics and bandwidth export on every scrape and exposes them in
//! OpenMetrics format.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `config`: configuration management
//! - `error`: error types
//! - `exporter`: scrape aggregation
//! - `hub`: router protocol and client
//! - `metrics`: descriptors and registry
//! - `prelude`: commonly used types and traits

mod api;
mod config;
mod error;
pub mod exporter;
pub mod hub;
pub mod metrics;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Args, Config};

/// Application error and result type
pub use error::{AppError, HubError, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Scrape aggregation
pub use exporter::{Exporter, Scrape};

/// Router client
pub use hub::{HubApi, HubClient};

/// Metrics registry
pub use metrics::MetricsRegistry;
