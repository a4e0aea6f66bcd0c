// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and scrape encoding

mod collector;
mod init;
mod scrape;

use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::sync::Mutex;

use collector::ScrapeCollector;

#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    // samples of the scrape being served
    scrape: ScrapeCollector,
    // self-metrics
    scrape_success: Counter,
    scrape_errors: Counter,
    scrape_duration_milliseconds: Gauge,
    last_scrape_ok: Arc<AtomicBool>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
