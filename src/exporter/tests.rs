// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Aggregation scenarios

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use super::*;
use crate::hub::xpath;
use crate::metrics::{SampleLabels, describe};

fn callback(path: &str, value: Value) -> Value {
    json!({
        "uid": 1,
        "result": {"code": 0, "description": "XMO_REQUEST_NO_ERR"},
        "xpath": path,
        "parameters": {"value": value}
    })
}

/// Ten hosts: #3 named by alias, #5 and #6 Wi-Fi named by the user,
/// #7 on an unknown interface, #8 to #10 inactive.
fn devices() -> Value {
    let hosts: Vec<Value> = (1..=10)
        .map(|i| {
            let mut active = true;
            let mut interface_type = "Ethernet";
            let mut host_name = format!("Host Name {i}");
            let mut user_host_name = String::new();
            let mut alias = String::new();

            if i == 3 {
                host_name.clear();
                alias = format!("Alias {i}");
            } else if (5..7).contains(&i) {
                interface_type = "WiFi";
                host_name.clear();
                user_host_name = format!("User Host Name {i}");
            } else if i == 7 {
                interface_type = "Invalid";
            } else if i > 7 {
                active = false;
            }

            json!({
                "UID": i,
                "Alias": alias,
                "PhysAddress": format!("AA:BB:CC:DD:EE:F{i}"),
                "IPAddress": format!("192.168.1.{i}"),
                "HostName": host_name,
                "Active": active,
                "InterfaceType": interface_type,
                "UserHostName": user_host_name
            })
        })
        .collect();
    Value::Array(hosts)
}

fn summary() -> ResponseEnvelope {
    let actions: Vec<Value> = [
        (xpath::FIRMWARE_VERSION, json!("ABC123")),
        (xpath::DOWNLOAD_RATE, json!(123.45)),
        (xpath::UPLOAD_RATE, json!(543.21)),
        (xpath::UP_TIME, json!(98_765_421.0)),
        (xpath::CONNECTED_DEVICES, devices()),
        (xpath::DOWNLOADED_BYTES, json!("654321")),
        (xpath::UPLOADED_BYTES, json!("123456")),
    ]
    .into_iter()
    .enumerate()
    .map(|(id, (path, value))| json!({"id": id, "callbacks": [callback(path, value)]}))
    .collect();

    serde_json::from_value(json!({
        "reply": {"uid": 0, "id": 1, "error": {"code": 0, "description": "Ok"}, "actions": actions}
    }))
    .unwrap()
}

fn export() -> ExportFetched {
    let lines = [
        ("F1", 100, 10),
        ("F1", 200, 20),
        ("F1", 300, 30),
        ("F2", 100, 10),
        ("F2", 200, 20),
        ("F3", 100, 10),
        ("F3", 200, 20),
        ("F3", 300, 30),
        ("F3", 400, 40),
        ("F4", 100, 10),
        ("F4", 200, 20),
        ("F5", 100, 10),
        ("F6", 100, 10),
        ("F6", 200, 20),
        ("F6", 300, 30),
        ("F6", 400, 40),
        ("F7", 100, 10),
        ("F7", 200, 20),
        ("F7", 300, 30),
        ("F8", 100, 10),
        ("F8", 200, 20),
        ("F9", 100, 10),
        ("F10", 100, 10),
    ];
    let body: Vec<String> = lines
        .iter()
        .map(|(suffix, down, up)| {
            format!("FAKE+SERIAL+NUMBER,AA:BB:CC:DD:EE:{suffix},2016-12-30,{down},{up}")
        })
        .collect();
    ExportFetched::new(body.join("\n"))
}

fn value_of(samples: &[Sample], metric: Metric) -> Option<f64> {
    samples.iter().find(|s| s.metric == metric).map(|s| s.value)
}

/// (host name, ip) -> (downloaded, uploaded) per MAC
fn device_totals(samples: &[Sample]) -> BTreeMap<String, (String, f64, f64)> {
    let mut totals: BTreeMap<String, (String, f64, f64)> = BTreeMap::new();
    for sample in samples {
        let SampleLabels::Device(labels) = &sample.labels else {
            continue;
        };
        let entry = totals
            .entry(labels.mac_address.clone())
            .or_insert_with(|| (labels.host_name.clone(), 0.0, 0.0));
        match sample.metric {
            Metric::DeviceDownloadedBytes => entry.1 = sample.value,
            Metric::DeviceUploadedBytes => entry.2 = sample.value,
            _ => unreachable!("device labels on {:?}", sample.metric),
        }
    }
    totals
}

#[test]
fn test_aggregate_full_scrape() {
    let samples = aggregate(Ok(summary()), Ok(export())).unwrap();

    let build_info = samples
        .iter()
        .find(|s| s.metric == Metric::BuildInfo)
        .unwrap();
    assert_eq!(build_info, &Sample::build_info("ABC123"));
    assert_eq!(value_of(&samples, Metric::DownloadRateMbps), Some(123.45));
    assert_eq!(value_of(&samples, Metric::UploadRateMbps), Some(543.21));
    assert_eq!(value_of(&samples, Metric::UptimeSeconds), Some(98_765_421.0));
    assert_eq!(value_of(&samples, Metric::DownloadBytes), Some(654_321.0));
    assert_eq!(value_of(&samples, Metric::UploadBytes), Some(123_456.0));
    assert_eq!(samples.last(), Some(&Sample::up(true)));

    let totals = device_totals(&samples);
    let expected = [
        ("AA:BB:CC:DD:EE:F1", "Host Name 1", 600.0, 60.0),
        ("AA:BB:CC:DD:EE:F2", "Host Name 2", 300.0, 30.0),
        ("AA:BB:CC:DD:EE:F3", "Alias 3", 1000.0, 100.0),
        ("AA:BB:CC:DD:EE:F4", "Host Name 4", 300.0, 30.0),
        ("AA:BB:CC:DD:EE:F5", "User Host Name 5", 100.0, 10.0),
        ("AA:BB:CC:DD:EE:F6", "User Host Name 6", 1000.0, 100.0),
    ];
    assert_eq!(totals.len(), expected.len());
    for (mac, host, down, up) in expected {
        assert_eq!(
            totals.get(mac),
            Some(&(host.to_string(), down, up)),
            "totals for {mac}"
        );
    }
}

#[test]
fn test_aggregate_excludes_invalid_and_inactive_devices() {
    let samples = aggregate(Ok(summary()), Ok(export())).unwrap();
    let totals = device_totals(&samples);

    for mac in [
        "AA:BB:CC:DD:EE:F7",
        "AA:BB:CC:DD:EE:F8",
        "AA:BB:CC:DD:EE:F9",
        "AA:BB:CC:DD:EE:F10",
    ] {
        assert!(!totals.contains_key(mac), "{mac} must not be reported");
    }
}

#[test]
fn test_aggregate_summary_failure_yields_error() {
    let result = aggregate(Err(HubError::Status { status: 500 }), Ok(export()));
    assert!(matches!(result, Err(HubError::Status { status: 500 })));
}

#[test]
fn test_aggregate_bandwidth_failure_yields_error() {
    let result = aggregate(
        Ok(summary()),
        Err(HubError::Protocol("XMO_ACCESS_RESTRICTED".to_string())),
    );
    assert!(matches!(result, Err(HubError::Protocol(_))));
}

#[test]
fn test_aggregate_skips_undecodable_sample() {
    let envelope: ResponseEnvelope = serde_json::from_value(json!({
        "reply": {
            "error": {"description": "Ok"},
            "actions": [
                {"callbacks": [callback(xpath::DOWNLOADED_BYTES, json!("not a number"))]},
                {"callbacks": [callback(xpath::UPLOAD_RATE, json!(1.5))]}
            ]
        }
    }))
    .unwrap();

    let samples = aggregate(Ok(envelope), Ok(ExportFetched::new(""))).unwrap();

    assert_eq!(value_of(&samples, Metric::DownloadBytes), None);
    assert_eq!(value_of(&samples, Metric::UploadRateMbps), Some(1.5));
    assert_eq!(samples.last(), Some(&Sample::up(true)));
}

#[test]
fn test_aggregate_without_device_list_reports_no_devices() {
    let envelope: ResponseEnvelope = serde_json::from_value(json!({
        "reply": {
            "error": {"description": "Ok"},
            "actions": [{"callbacks": [callback(xpath::UP_TIME, json!(10))]}]
        }
    }))
    .unwrap();

    let samples = aggregate(Ok(envelope), Ok(export())).unwrap();

    assert!(device_totals(&samples).is_empty());
    assert_eq!(samples.len(), 2);
}

#[test]
fn test_aggregate_only_emits_described_metrics() {
    let samples = aggregate(Ok(summary()), Ok(export())).unwrap();
    let names: Vec<&str> = describe().iter().map(|d| d.name).collect();
    for sample in &samples {
        assert!(names.contains(&sample.metric.descriptor().name));
    }
}

struct FakeHub {
    fail_summary: bool,
    fail_bandwidth: bool,
    calls: AtomicUsize,
}

impl FakeHub {
    fn new(fail_summary: bool, fail_bandwidth: bool) -> Self {
        Self {
            fail_summary,
            fail_bandwidth,
            calls: AtomicUsize::new(0),
        }
    }
}

impl HubApi for FakeHub {
    async fn summary_statistics(&self) -> Result<ResponseEnvelope, HubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_summary {
            return Err(HubError::Status { status: 503 });
        }
        Ok(summary())
    }

    async fn bandwidth_statistics(&self) -> Result<ExportFetched, HubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_bandwidth {
            return Err(HubError::Decode("export filename is missing".to_string()));
        }
        Ok(export())
    }

    async fn is_authenticated(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn test_collect_success() {
    let exporter = Exporter::new(Arc::new(FakeHub::new(false, false)));

    let scrape = exporter.collect().await;

    assert!(scrape.is_up());
    assert_eq!(scrape.samples.last(), Some(&Sample::up(true)));
    assert_eq!(device_totals(&scrape.samples).len(), 6);
}

#[tokio::test]
async fn test_collect_partial_failure_reports_down_only() {
    let exporter = Exporter::new(Arc::new(FakeHub::new(true, false)));

    let scrape = exporter.collect().await;

    assert!(!scrape.is_up());
    assert!(scrape.error.as_ref().is_some_and(HubError::is_transport));
    assert_eq!(scrape.samples, vec![Sample::up(false)]);
    // both calls are issued even when one fails
    assert_eq!(exporter.client().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_collect_bandwidth_failure_reports_down_only() {
    let exporter = Exporter::new(Arc::new(FakeHub::new(false, true)));

    let scrape = exporter.collect().await;

    assert!(matches!(scrape.error, Some(HubError::Decode(_))));
    assert!(!scrape.error.as_ref().is_some_and(HubError::is_transport));
    assert_eq!(scrape.samples, vec![Sample::up(false)]);
}
