// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API module for the Home Hub exporter
//!
//! # Endpoints
//! - `GET /` — landing page
//! - `GET /health` — health check
//! - `GET /metrics` — scrape the router and export Prometheus metrics

pub mod handlers;
mod state;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::hub::HubApi;

pub use state::AppState;

/// Creates the main Axum router with all endpoints
pub fn create_router<C: HubApi>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check::<C>))
        .route("/metrics", get(handlers::metrics_handler::<C>))
        .with_state(state)
}
