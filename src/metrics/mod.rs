// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metric descriptors, scrape samples and the Prometheus registry

pub mod descriptors;
mod labels;
mod registry;
mod sample;


/// Fixed descriptor set
pub use descriptors::{Metric, MetricDescriptor, MetricKind, describe};

/// Labels for devices and build info
pub use labels::{BuildInfoLabels, DeviceLabels};

/// Prometheus metrics registry
pub use registry::MetricsRegistry;

/// Samples produced by one scrape
pub use sample::{Sample, SampleLabels};
