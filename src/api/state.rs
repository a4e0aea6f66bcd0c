// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Application state shared across HTTP handlers

use crate::exporter::Exporter;
use crate::metrics::MetricsRegistry;

/// Shared application state
pub struct AppState<C> {
    pub exporter: Exporter<C>,
    pub metrics: MetricsRegistry,
}
