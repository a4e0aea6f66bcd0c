// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use homehub_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::Config;
pub use crate::error::{AppError, HubError, Result};

// Router client
pub use crate::hub::{ExportFetched, HubApi, HubClient, ResponseEnvelope, Session};

// Scrape aggregation and metrics
pub use crate::exporter::{Exporter, Scrape};
pub use crate::metrics::{Metric, MetricsRegistry, Sample, SampleLabels};
