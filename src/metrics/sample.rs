// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Point-in-time observations produced by one scrape

use super::descriptors::Metric;
use super::labels::{BuildInfoLabels, DeviceLabels};

/// Label set attached to a sample
#[derive(Clone, Debug, PartialEq)]
pub enum SampleLabels {
    None,
    Firmware(BuildInfoLabels),
    Device(DeviceLabels),
}

/// One emitted (metric, labels, value) observation
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub metric: Metric,
    pub labels: SampleLabels,
    pub value: f64,
}

impl Sample {
    pub fn new(metric: Metric, value: f64) -> Self {
        Self {
            metric,
            labels: SampleLabels::None,
            value,
        }
    }

    pub fn up(up: bool) -> Self {
        Self::new(Metric::Up, if up { 1.0 } else { 0.0 })
    }

    pub fn build_info(firmware: impl Into<String>) -> Self {
        Self {
            metric: Metric::BuildInfo,
            labels: SampleLabels::Firmware(BuildInfoLabels {
                firmware: firmware.into(),
            }),
            value: 1.0,
        }
    }

    pub fn device(metric: Metric, labels: DeviceLabels, value: f64) -> Self {
        Self {
            metric,
            labels: SampleLabels::Device(labels),
            value,
        }
    }
}
