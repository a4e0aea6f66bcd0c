// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Scrape aggregation
//!
//! One scrape issues the summary batch and the bandwidth export against the
//! router, then folds both replies into [`Sample`]s. A scrape either succeeds
//! as a whole and ends with `up = 1`, or yields `up = 0` alone.

mod bandwidth;
mod devices;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::HubError;
use crate::hub::{ExportFetched, HubApi, ResponseEnvelope, SummaryReading};
use crate::metrics::{Metric, Sample};

pub use bandwidth::{BandwidthRecord, DeviceBandwidth, fold};
pub use devices::{Device, DeviceTable, InterfaceKind, resolve_host_name};

/// Outcome of one scrape
#[derive(Debug)]
pub struct Scrape {
    pub samples: Vec<Sample>,
    pub error: Option<HubError>,
    pub duration: Duration,
}

impl Scrape {
    pub fn is_up(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs scrapes against a router
pub struct Exporter<C> {
    client: Arc<C>,
}

impl<C> Clone for Exporter<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HubApi> Exporter<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Issues both statistics calls and aggregates their replies.
    pub async fn collect(&self) -> Scrape {
        let start = Instant::now();
        let (summary, bandwidth) = tokio::join!(
            self.client.summary_statistics(),
            self.client.bandwidth_statistics()
        );

        let (samples, error) = match aggregate(summary, bandwidth) {
            Ok(samples) => (samples, None),
            Err(e) if e.is_transport() => {
                tracing::warn!("Scrape failed, router unreachable: {}", e);
                (vec![Sample::up(false)], Some(e))
            }
            Err(e) => {
                tracing::warn!("Scrape failed: {}", e);
                (vec![Sample::up(false)], Some(e))
            }
        };

        let duration = start.elapsed();
        tracing::debug!("Scrape finished in {:?}", duration);
        Scrape {
            samples,
            error,
            duration,
        }
    }
}

/// Folds the two statistics replies into samples.
///
/// Fails with the first error if either call failed; the caller then
/// publishes `up = 0` only.
pub fn aggregate(
    summary: Result<ResponseEnvelope, HubError>,
    bandwidth: Result<ExportFetched, HubError>,
) -> Result<Vec<Sample>, HubError> {
    let summary = summary?;
    let export = bandwidth?;

    let mut samples = Vec::new();
    let mut devices = DeviceTable::default();

    for callback in summary.callbacks() {
        let reading = match SummaryReading::from_callback(callback) {
            Ok(Some(reading)) => reading,
            Ok(None) => {
                tracing::trace!("Ignoring callback for {}", callback.xpath);
                continue;
            }
            Err(e) => {
                tracing::warn!("Skipping sample for {}: {}", callback.xpath, e);
                continue;
            }
        };

        match reading {
            SummaryReading::ConnectedDevices(records) => {
                devices = DeviceTable::from_records(&records);
            }
            SummaryReading::DownloadedBytes(v) => {
                samples.push(Sample::new(Metric::DownloadBytes, v));
            }
            SummaryReading::UploadedBytes(v) => {
                samples.push(Sample::new(Metric::UploadBytes, v));
            }
            SummaryReading::DownloadRate(v) => {
                samples.push(Sample::new(Metric::DownloadRateMbps, v));
            }
            SummaryReading::UploadRate(v) => {
                samples.push(Sample::new(Metric::UploadRateMbps, v));
            }
            SummaryReading::Uptime(v) => {
                samples.push(Sample::new(Metric::UptimeSeconds, v));
            }
            SummaryReading::FirmwareVersion(firmware) => {
                samples.push(Sample::build_info(firmware));
            }
        }
    }

    tracing::trace!("Bandwidth export body is {} bytes", export.body.len());
    if devices.is_empty() {
        tracing::debug!("No tracked devices, skipping bandwidth export");
    } else {
        tracing::debug!("Folding bandwidth export for {} device(s)", devices.len());
    }
    for (mac_address, total) in fold(&devices, &export.body) {
        let Some(device) = devices.get(&mac_address) else {
            continue;
        };
        samples.push(Sample::device(
            Metric::DeviceUploadedBytes,
            device.labels(),
            total.uploaded,
        ));
        samples.push(Sample::device(
            Metric::DeviceDownloadedBytes,
            device.labels(),
            total.downloaded,
        ));
    }

    samples.push(Sample::up(true));
    Ok(samples)
}

#[cfg(test)]
mod tests;
