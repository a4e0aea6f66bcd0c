// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Data model paths read from the hub

/// Bandwidth monitoring service, target of the statistics export
pub const BANDWIDTH_MONITORING: &str = "Device/Services/BandwidthMonitoring";
/// Hosts table (connected devices)
pub const CONNECTED_DEVICES: &str = "Device/Hosts/Hosts";
/// Bytes received on the WAN interface
pub const DOWNLOADED_BYTES: &str = "Device/IP/Interfaces/Interface[@uid='1']/Stats/BytesReceived";
/// DSL downstream sync rate
pub const DOWNLOAD_RATE: &str = "Device/DSL/Channels/Channel[@uid='1']/DownstreamCurrRate";
/// Firmware version string
pub const FIRMWARE_VERSION: &str = "Device/DeviceInfo/ExternalFirmwareVersion";
/// Bytes sent on the WAN interface
pub const UPLOADED_BYTES: &str = "Device/IP/Interfaces/Interface[@uid='1']/Stats/BytesSent";
/// DSL upstream sync rate
pub const UPLOAD_RATE: &str = "Device/DSL/Channels/Channel[@uid='1']/UpstreamCurrRate";
/// Router uptime
pub const UP_TIME: &str = "Device/DeviceInfo/UpTime";

/// Paths read by the summary batch, in request order
pub const SUMMARY_XPATHS: [&str; 7] = [
    CONNECTED_DEVICES,
    DOWNLOADED_BYTES,
    DOWNLOAD_RATE,
    FIRMWARE_VERSION,
    UPLOADED_BYTES,
    UPLOAD_RATE,
    UP_TIME,
];
