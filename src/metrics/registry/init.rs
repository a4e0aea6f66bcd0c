// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Registry initialization and metric registration

use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::sync::Mutex;

use super::MetricsRegistry;
use super::collector::ScrapeCollector;

impl MetricsRegistry {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let scrape = ScrapeCollector::default();
        registry.register_collector(Box::new(scrape.clone()));

        let scrape_success = Counter::default();
        registry.register(
            "bt_homehub_scrape_success",
            "Successful scrapes of the router",
            scrape_success.clone(),
        );
        let scrape_errors = Counter::default();
        registry.register(
            "bt_homehub_scrape_errors",
            "Failed scrapes of the router",
            scrape_errors.clone(),
        );
        let scrape_duration_milliseconds = Gauge::default();
        registry.register(
            "bt_homehub_scrape_duration_milliseconds",
            "Duration of last scrape in milliseconds",
            scrape_duration_milliseconds.clone(),
        );

        Self {
            registry: Arc::new(Mutex::new(registry)),
            scrape,
            scrape_success,
            scrape_errors,
            scrape_duration_milliseconds,
            last_scrape_ok: Arc::new(AtomicBool::new(true)),
        }
    }
}
