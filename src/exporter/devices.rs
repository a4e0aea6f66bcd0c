// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Device table built from the connected-devices reading

use std::collections::BTreeMap;

use crate::hub::DeviceRecord;
use crate::metrics::DeviceLabels;

/// Interface a host is attached through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    WiFi,
    Ethernet,
    Other,
}

impl InterfaceKind {
    pub fn classify(interface_type: &str) -> Self {
        match interface_type {
            "WiFi" => Self::WiFi,
            "Ethernet" => Self::Ethernet,
            _ => Self::Other,
        }
    }

    /// Only Wi-Fi and Ethernet hosts are tracked.
    pub fn is_physical(self) -> bool {
        matches!(self, Self::WiFi | Self::Ethernet)
    }
}

/// A host the router reports, keyed by its uppercased MAC address
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    pub mac_address: String,
    pub ip_address: String,
    pub host_name: String,
    pub interface: InterfaceKind,
    pub active: bool,
}

impl Device {
    pub fn from_record(record: &DeviceRecord) -> Self {
        Self {
            mac_address: record.phys_address.to_uppercase(),
            ip_address: record.ip_address.clone(),
            host_name: resolve_host_name(record).to_string(),
            interface: InterfaceKind::classify(&record.interface_type),
            active: record.active,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.active && self.interface.is_physical()
    }

    pub fn labels(&self) -> DeviceLabels {
        DeviceLabels {
            host_name: self.host_name.clone(),
            ip_address: self.ip_address.clone(),
            mac_address: self.mac_address.clone(),
        }
    }
}

/// First non-empty of user-assigned name, DHCP host name, router alias
pub fn resolve_host_name(record: &DeviceRecord) -> &str {
    [&record.user_host_name, &record.host_name]
        .into_iter()
        .find(|name| !name.is_empty())
        .unwrap_or(&record.alias)
}

/// Tracked devices of one scrape
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceTable {
    devices: BTreeMap<String, Device>,
}

impl DeviceTable {
    /// Keeps active Wi-Fi and Ethernet hosts; a later record for the same
    /// MAC replaces an earlier one.
    pub fn from_records(records: &[DeviceRecord]) -> Self {
        let devices = records
            .iter()
            .map(Device::from_record)
            .filter(Device::is_tracked)
            .map(|device| (device.mac_address.clone(), device))
            .collect();
        Self { devices }
    }

    pub fn get(&self, mac_address: &str) -> Option<&Device> {
        self.devices.get(mac_address)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mac: &str, interface_type: &str, active: bool) -> DeviceRecord {
        DeviceRecord {
            phys_address: mac.to_string(),
            ip_address: "192.168.1.20".to_string(),
            host_name: "host".to_string(),
            interface_type: interface_type.to_string(),
            active,
            ..DeviceRecord::default()
        }
    }

    #[test]
    fn test_host_name_precedence() {
        let mut record = DeviceRecord {
            user_host_name: "user".to_string(),
            host_name: "dhcp".to_string(),
            alias: "alias".to_string(),
            ..DeviceRecord::default()
        };
        assert_eq!(resolve_host_name(&record), "user");

        record.user_host_name.clear();
        assert_eq!(resolve_host_name(&record), "dhcp");

        record.host_name.clear();
        assert_eq!(resolve_host_name(&record), "alias");

        record.alias.clear();
        assert_eq!(resolve_host_name(&record), "");
    }

    #[test]
    fn test_interface_classification() {
        assert_eq!(InterfaceKind::classify("WiFi"), InterfaceKind::WiFi);
        assert_eq!(InterfaceKind::classify("Ethernet"), InterfaceKind::Ethernet);
        assert_eq!(InterfaceKind::classify("Invalid"), InterfaceKind::Other);
        assert_eq!(InterfaceKind::classify("wifi"), InterfaceKind::Other);
        assert!(!InterfaceKind::Other.is_physical());
    }

    #[test]
    fn test_mac_address_is_uppercased() {
        let device = Device::from_record(&record("aa:bb:cc:dd:ee:0f", "WiFi", true));
        assert_eq!(device.mac_address, "AA:BB:CC:DD:EE:0F");
    }

    #[test]
    fn test_table_drops_inactive_and_unknown_interfaces() {
        let records = vec![
            record("AA:BB:CC:DD:EE:01", "Ethernet", true),
            record("AA:BB:CC:DD:EE:02", "WiFi", true),
            record("AA:BB:CC:DD:EE:03", "Invalid", true),
            record("AA:BB:CC:DD:EE:04", "Ethernet", false),
        ];

        let table = DeviceTable::from_records(&records);

        assert_eq!(table.len(), 2);
        assert!(table.get("AA:BB:CC:DD:EE:01").is_some());
        assert!(table.get("AA:BB:CC:DD:EE:02").is_some());
        assert!(table.get("AA:BB:CC:DD:EE:03").is_none());
        assert!(table.get("AA:BB:CC:DD:EE:04").is_none());
    }

    #[test]
    fn test_device_labels() {
        let device = Device::from_record(&record("aa:bb:cc:dd:ee:01", "WiFi", true));
        let labels = device.labels();
        assert_eq!(labels.host_name, "host");
        assert_eq!(labels.ip_address, "192.168.1.20");
        assert_eq!(labels.mac_address, "AA:BB:CC:DD:EE:01");
    }
}
