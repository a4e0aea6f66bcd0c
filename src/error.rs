// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for the Home Hub exporter

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Home Hub API error
    #[error("Home Hub error: {0}")]
    Hub(#[from] HubError),

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// Failure of a single call against the hub JSON API
#[derive(Debug, Error)]
pub enum HubError {
    /// Connection failure, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The hub answered with an HTTP error status
    #[error("Hub returned HTTP response code: {status}")]
    Status { status: u16 },

    /// The reply envelope carried a description other than the success marker
    #[error("Hub rejected request: {0}")]
    Protocol(String),

    /// The reply could not be interpreted
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request or the session cookie could not be serialized
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A statistics call was issued before a successful login
    #[error("Session is not authenticated")]
    NotAuthenticated,

    /// Login was attempted on an already authenticated session
    #[error("Session is already authenticated")]
    AlreadyAuthenticated,
}

impl HubError {
    /// Returns `true` for failures below the JSON protocol (connection, timeout, HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
