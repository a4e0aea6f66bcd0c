// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Two-stage bandwidth statistics export
//!
//! The hub first materializes a CSV file ([`ExportTriggered`]) which is then
//! downloaded by name ([`ExportFetched`]). Fetching consumes the trigger
//! result, so a download can only follow a successful trigger.

use chrono::NaiveDate;

/// First day of the exported date range
pub const EXPORT_START_DATE: &str = "20000101";

/// Date format of the export parameters
const EXPORT_DATE_FORMAT: &str = "%Y%m%d";

/// The hub has written the export; `filename` is relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTriggered {
    pub filename: String,
}

/// Raw CSV body of a downloaded export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFetched {
    pub body: String,
}

impl ExportFetched {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Export end date in the hub's `YYYYMMDD` format
pub fn export_end_date(today: NaiveDate) -> String {
    today.format(EXPORT_DATE_FORMAT).to_string()
}

/// URL of an exported file below the router base URL
pub fn export_url(base_url: &str, filename: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        filename.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_end_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_end_date(date), "20260307");
    }

    #[test]
    fn test_export_url() {
        assert_eq!(
            export_url("http://192.168.1.254", "stats/bm.csv"),
            "http://192.168.1.254/stats/bm.csv"
        );
        assert_eq!(
            export_url("http://192.168.1.254/", "/bm.csv"),
            "http://192.168.1.254/bm.csv"
        );
    }
}
