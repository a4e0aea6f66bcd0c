// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Fixed metric descriptors published by every scrape

use prometheus_client::metrics::MetricType;

/// Prefix shared by all exported metric names
pub const NAMESPACE: &str = "bt_homehub";

/// Metric type of a descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn metric_type(self) -> MetricType {
        match self {
            Self::Gauge => MetricType::Gauge,
            Self::Counter => MetricType::Counter,
        }
    }
}

/// Name, help text and label names of one metric
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: &'static [&'static str],
    pub kind: MetricKind,
}

/// Metrics produced by the aggregation, in exposition order
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Metric {
    Up,
    BuildInfo,
    DownloadRateMbps,
    UploadRateMbps,
    UptimeSeconds,
    DownloadBytes,
    UploadBytes,
    DeviceDownloadedBytes,
    DeviceUploadedBytes,
}

const DEVICE_LABELS: &[&str] = &["host_name", "ip_address", "mac_address"];

static DESCRIPTORS: [MetricDescriptor; 9] = [
    MetricDescriptor {
        name: "bt_homehub_up",
        help: "Whether the router is up",
        labels: &[],
        kind: MetricKind::Gauge,
    },
    MetricDescriptor {
        name: "bt_homehub_build_info",
        help: "Router build information (value=1)",
        labels: &["firmware"],
        kind: MetricKind::Gauge,
    },
    MetricDescriptor {
        name: "bt_homehub_download_rate_mbps",
        help: "Download rate of the router",
        labels: &[],
        kind: MetricKind::Gauge,
    },
    MetricDescriptor {
        name: "bt_homehub_upload_rate_mbps",
        help: "Upload rate of the router",
        labels: &[],
        kind: MetricKind::Gauge,
    },
    MetricDescriptor {
        name: "bt_homehub_uptime_seconds",
        help: "Uptime of the router",
        labels: &[],
        kind: MetricKind::Gauge,
    },
    MetricDescriptor {
        name: "bt_homehub_download_bytes",
        help: "Total bytes downloaded by the router",
        labels: &[],
        kind: MetricKind::Counter,
    },
    MetricDescriptor {
        name: "bt_homehub_upload_bytes",
        help: "Total bytes uploaded by the router",
        labels: &[],
        kind: MetricKind::Counter,
    },
    MetricDescriptor {
        name: "bt_homehub_device_downloaded_bytes",
        help: "Total bytes downloaded by the device",
        labels: DEVICE_LABELS,
        kind: MetricKind::Gauge,
    },
    MetricDescriptor {
        name: "bt_homehub_device_uploaded_bytes",
        help: "Total bytes uploaded by the device",
        labels: DEVICE_LABELS,
        kind: MetricKind::Gauge,
    },
];

impl Metric {
    pub const ALL: [Metric; 9] = [
        Self::Up,
        Self::BuildInfo,
        Self::DownloadRateMbps,
        Self::UploadRateMbps,
        Self::UptimeSeconds,
        Self::DownloadBytes,
        Self::UploadBytes,
        Self::DeviceDownloadedBytes,
        Self::DeviceUploadedBytes,
    ];

    pub fn descriptor(self) -> &'static MetricDescriptor {
        &DESCRIPTORS[self as usize]
    }
}

/// Enumerates every descriptor a scrape may emit
pub fn describe() -> &'static [MetricDescriptor] {
    &DESCRIPTORS
}
