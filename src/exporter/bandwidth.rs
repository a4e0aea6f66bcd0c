// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Bandwidth export parsing and per-device folding
//!
//! The export is a CSV body with one line per device and connection period:
//! `serial,mac,date,downloaded,uploaded`. A device usually has several lines
//! in the exported range, so totals are summed per MAC address.

use std::collections::BTreeMap;

use super::devices::DeviceTable;

/// Minimum number of fields of a usable line
const MIN_FIELDS: usize = 5;

/// One line of the export
#[derive(Clone, Debug, PartialEq)]
pub struct BandwidthRecord {
    pub serial: String,
    pub mac_address: String,
    pub date: String,
    pub downloaded: f64,
    pub uploaded: f64,
}

impl BandwidthRecord {
    /// Parses one CSV line. Lines with fewer than five fields yield `None`;
    /// unparseable byte counts are read as zero.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(Self {
            serial: fields[0].to_string(),
            mac_address: fields[1].to_uppercase(),
            date: fields[2].to_string(),
            downloaded: parse_bytes(fields[3]),
            uploaded: parse_bytes(fields[4]),
        })
    }
}

fn parse_bytes(field: &str) -> f64 {
    field.parse().unwrap_or(0.0)
}

/// Running totals of one device, keyed by MAC address in [`fold`]
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceBandwidth {
    pub downloaded: f64,
    pub uploaded: f64,
}

impl DeviceBandwidth {
    fn seed(record: &BandwidthRecord) -> Self {
        Self {
            downloaded: record.downloaded,
            uploaded: record.uploaded,
        }
    }

    fn add(&mut self, record: &BandwidthRecord) {
        self.downloaded += record.downloaded;
        self.uploaded += record.uploaded;
    }
}

/// Sums the export body per tracked device.
///
/// Lines for MAC addresses missing from `devices` are dropped.
pub fn fold(devices: &DeviceTable, body: &str) -> BTreeMap<String, DeviceBandwidth> {
    let mut totals: BTreeMap<String, DeviceBandwidth> = BTreeMap::new();

    for record in body.lines().filter_map(BandwidthRecord::parse_line) {
        let Some(device) = devices.get(&record.mac_address) else {
            continue;
        };

        match totals.get_mut(&record.mac_address) {
            Some(total) => total.add(&record),
            None if device.active => {
                let total = DeviceBandwidth::seed(&record);
                totals.insert(record.mac_address, total);
            }
            None => {}
        }
    }

    totals
}
