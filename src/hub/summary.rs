// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Typed readings of the summary batch
//!
//! A callback value is a string, a number or a list of host records depending
//! on the path that was read. [`SummaryReading::from_callback`] resolves it
//! by xpath into a typed variant.

use serde::Deserialize;
use serde_json::Value;

use super::protocol::ResponseCallback;
use super::xpath;
use crate::error::HubError;

/// Host entry from the `Device/Hosts/Hosts` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    #[serde(rename = "UID", alias = "uid")]
    pub uid: i64,
    #[serde(rename = "Alias")]
    pub alias: String,
    #[serde(rename = "PhysAddress")]
    pub phys_address: String,
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
    #[serde(rename = "HostName")]
    pub host_name: String,
    #[serde(rename = "Active")]
    pub active: bool,
    #[serde(rename = "InterfaceType")]
    pub interface_type: String,
    #[serde(rename = "UserHostName")]
    pub user_host_name: String,
}

/// One decoded value of the summary batch
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryReading {
    ConnectedDevices(Vec<DeviceRecord>),
    DownloadedBytes(f64),
    UploadedBytes(f64),
    DownloadRate(f64),
    UploadRate(f64),
    Uptime(f64),
    FirmwareVersion(String),
}

impl SummaryReading {
    /// Resolves a callback by its xpath.
    ///
    /// Returns `Ok(None)` for paths the summary batch does not read.
    pub fn from_callback(callback: &ResponseCallback) -> Result<Option<Self>, HubError> {
        let value = callback.parameters.value.as_ref();
        let reading = match callback.xpath.as_str() {
            xpath::CONNECTED_DEVICES => Self::ConnectedDevices(devices(value)?),
            xpath::DOWNLOADED_BYTES => Self::DownloadedBytes(number(&callback.xpath, value)?),
            xpath::UPLOADED_BYTES => Self::UploadedBytes(number(&callback.xpath, value)?),
            xpath::DOWNLOAD_RATE => Self::DownloadRate(number(&callback.xpath, value)?),
            xpath::UPLOAD_RATE => Self::UploadRate(number(&callback.xpath, value)?),
            xpath::UP_TIME => Self::Uptime(number(&callback.xpath, value)?),
            xpath::FIRMWARE_VERSION => Self::FirmwareVersion(text(&callback.xpath, value)?),
            _ => return Ok(None),
        };
        Ok(Some(reading))
    }
}

fn devices(value: Option<&Value>) -> Result<Vec<DeviceRecord>, HubError> {
    let value = value.ok_or_else(|| missing(xpath::CONNECTED_DEVICES))?;
    Vec::<DeviceRecord>::deserialize(value)
        .map_err(|e| HubError::Decode(format!("{}: {e}", xpath::CONNECTED_DEVICES)))
}

/// Numbers arrive either as JSON numbers or as decimal strings.
fn number(path: &str, value: Option<&Value>) -> Result<f64, HubError> {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| HubError::Decode(format!("{path}: {n} is not a float"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| HubError::Decode(format!("{path}: {s:?}: {e}"))),
        Some(other) => Err(HubError::Decode(format!(
            "{path}: expected a number, got {other}"
        ))),
        None => Err(missing(path)),
    }
}

fn text(path: &str, value: Option<&Value>) -> Result<String, HubError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(HubError::Decode(format!(
            "{path}: expected a string, got {other}"
        ))),
        None => Err(missing(path)),
    }
}

fn missing(path: &str) -> HubError {
    HubError::Decode(format!("{path}: value is missing"))
}
