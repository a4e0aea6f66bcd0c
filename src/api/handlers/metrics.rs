// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::api::AppState;
use crate::hub::HubApi;

pub const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// GET /metrics
///
/// Runs one scrape against the router and encodes the registry.
pub async fn metrics_handler<C: HubApi>(State(state): State<Arc<AppState<C>>>) -> Response {
    tracing::debug!("/metrics scrape router");
    let scrape = state.exporter.collect().await;

    if scrape.is_up() {
        state.metrics.record_scrape_success();
    } else {
        state.metrics.record_scrape_error();
    }
    state
        .metrics
        .record_scrape_duration(scrape.duration.as_secs_f64());

    match state.metrics.encode_scrape(scrape.samples).await {
        Ok(metrics_text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)],
            metrics_text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
                .into_response()
        }
    }
}
