// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::hub::HubApi;

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub authenticated: bool,
    pub scrapes: ScrapeCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeCounts {
    pub success: u64,
    pub errors: u64,
}

/// GET /health
///
/// Reports "healthy" unless the most recent scrape failed, in which case
/// the status is "degraded" with HTTP 503.
pub async fn health_check<C: HubApi>(State(state): State<Arc<AppState<C>>>) -> impl IntoResponse {
    let healthy = state.metrics.last_scrape_succeeded();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        authenticated: state.exporter.client().is_authenticated().await,
        scrapes: ScrapeCounts {
            success: state.metrics.scrape_success_count(),
            errors: state.metrics.scrape_error_count(),
        },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
