// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Scrape encoding and self-metric bookkeeping

use crate::error::AppError;
use crate::metrics::sample::Sample;
use prometheus_client::encoding::text::encode;
use std::sync::atomic::Ordering;

use super::MetricsRegistry;

impl MetricsRegistry {
    /// Publishes the samples of one scrape and encodes the whole registry.
    ///
    /// The registry lock is held across both steps so concurrent requests
    /// never encode each other's samples.
    pub async fn encode_scrape(&self, samples: Vec<Sample>) -> Result<String, AppError> {
        let registry = self.registry.lock().await;
        self.scrape.publish(samples);
        let mut buffer = String::new();
        encode(&mut buffer, &registry).map_err(|e| AppError::Metrics(e.to_string()))?;
        Ok(buffer)
    }

    pub fn record_scrape_success(&self) {
        self.scrape_success.inc();
        self.last_scrape_ok.store(true, Ordering::Relaxed);
    }

    pub fn record_scrape_error(&self) {
        self.scrape_errors.inc();
        self.last_scrape_ok.store(false, Ordering::Relaxed);
    }

    pub fn record_scrape_duration(&self, duration_secs: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let millis = (duration_secs * 1000.0).round() as i64;
        self.scrape_duration_milliseconds.set(millis);
    }

    /// Get scrape success count for health check
    pub fn scrape_success_count(&self) -> u64 {
        self.scrape_success.get()
    }

    /// Get scrape error count for health check
    pub fn scrape_error_count(&self) -> u64 {
        self.scrape_errors.get()
    }

    /// `false` only if the most recent scrape failed
    pub fn last_scrape_succeeded(&self) -> bool {
        self.last_scrape_ok.load(Ordering::Relaxed)
    }
}
