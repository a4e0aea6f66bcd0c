// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Home Hub JSON API client module
//!
//! This module talks to the router's `cgi/json-req` endpoint: it signs
//! batches of actions with the vendor digest scheme, keeps the session state
//! and decodes the replies into typed readings.

mod client;
pub mod digest;
mod export;
pub mod protocol;
mod session;
mod summary;
pub mod xpath;

use std::future::Future;

use crate::error::HubError;

// Re-export public types and functions
pub use client::HubClient;
pub use export::{ExportFetched, ExportTriggered};
pub use protocol::{HubResponse, ResponseCallback, ResponseEnvelope};
pub use session::{API_PATH, Session};
pub use summary::{DeviceRecord, SummaryReading};

/// Statistics calls a scrape depends on
///
/// Implemented by [`HubClient`]; the exporter only sees this trait so that the
/// aggregation can run against canned replies.
pub trait HubApi: Send + Sync + 'static {
    /// Reply to the summary `getValue` batch
    fn summary_statistics(
        &self,
    ) -> impl Future<Output = Result<ResponseEnvelope, HubError>> + Send;

    /// Downloaded bandwidth export
    fn bandwidth_statistics(&self) -> impl Future<Output = Result<ExportFetched, HubError>> + Send;

    /// Whether login has succeeded
    fn is_authenticated(&self) -> impl Future<Output = bool> + Send;
}

impl HubApi for HubClient {
    fn summary_statistics(
        &self,
    ) -> impl Future<Output = Result<ResponseEnvelope, HubError>> + Send {
        HubClient::summary_statistics(self)
    }

    fn bandwidth_statistics(&self) -> impl Future<Output = Result<ExportFetched, HubError>> + Send {
        HubClient::bandwidth_statistics(self)
    }

    fn is_authenticated(&self) -> impl Future<Output = bool> + Send {
        HubClient::is_authenticated(self)
    }
}
