// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the Home Hub exporter
//!
//! Loads configuration from command line flags, falling back to environment
//! variables (optionally from a `.env` file) and then to defaults.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;

use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const LISTEN_ADDRESS: &str = ":19092";
    pub const HUB_ADDRESS: &str = "192.168.1.254";
    pub const HUB_USERNAME: &str = "admin";
    pub const HUB_PASSWORD: &str = "";
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const LISTEN_ADDRESS: &str = "HUB_EXPORTER_LISTEN_ADDRESS";
    pub const HUB_ADDRESS: &str = "HUB_ADDRESS";
    pub const HUB_USERNAME: &str = "HUB_USERNAME";
    pub const HUB_PASSWORD: &str = "HUB_PASSWORD";
    pub const REQUEST_TIMEOUT_SECS: &str = "HUB_REQUEST_TIMEOUT_SECONDS";
}

/// Command line flags
#[derive(Debug, Parser)]
#[command(name = "homehub-exporter", version, about = "Prometheus exporter for the Home Hub router")]
pub struct Args {
    /// Address that the metrics HTTP server will listen on
    #[arg(long, env = env_vars::LISTEN_ADDRESS, default_value = defaults::LISTEN_ADDRESS)]
    pub listen_address: String,

    /// Address of the Home Hub router
    #[arg(long, env = env_vars::HUB_ADDRESS, default_value = defaults::HUB_ADDRESS)]
    pub hub_address: String,

    /// Username for the Home Hub router
    #[arg(long, env = env_vars::HUB_USERNAME, default_value = defaults::HUB_USERNAME)]
    pub hub_username: String,

    /// Password for the Home Hub router
    #[arg(
        long,
        env = env_vars::HUB_PASSWORD,
        default_value = defaults::HUB_PASSWORD,
        hide_env_values = true
    )]
    pub hub_password: String,

    /// Timeout for every HTTP call to the router, in seconds
    #[arg(long, env = env_vars::REQUEST_TIMEOUT_SECS, default_value_t = defaults::REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,
}

/// Application-wide configuration
#[derive(Debug)]
pub struct Config {
    pub listen_address: String,
    pub hub_address: String,
    pub username: String,
    pub password: SecretString,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_address: defaults::LISTEN_ADDRESS.to_string(),
            hub_address: defaults::HUB_ADDRESS.to_string(),
            username: defaults::HUB_USERNAME.to_string(),
            password: SecretString::from(defaults::HUB_PASSWORD.to_string()),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            listen_address: args.listen_address,
            hub_address: args.hub_address,
            username: args.hub_username,
            password: SecretString::from(args.hub_password),
            request_timeout: Duration::from_secs(args.request_timeout),
        }
    }
}

impl Config {
    /// Loads configuration from the environment and command line flags
    ///
    /// `.env` is read by the binary before this is called.
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Builds and validates configuration from parsed flags
    pub fn from_args(args: Args) -> Result<Self> {
        let config = Config::from(args);
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration
    pub fn validate(&self) -> Result<()> {
        if self.hub_address.trim().is_empty() {
            return Err(AppError::Config("Hub address cannot be empty".to_string()));
        }

        if self.username.trim().is_empty() {
            return Err(AppError::Config("Hub username cannot be empty".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL of the router, `http://` unless the address names a scheme
    pub fn hub_base_url(&self) -> String {
        let address = self.hub_address.trim().trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        }
    }

    /// Socket address to bind, accepting the `:PORT` shorthand for all interfaces
    pub fn listen_socket_addr(&self) -> Result<SocketAddr> {
        let address = self.listen_address.trim();
        let addr = if address.starts_with(':') {
            format!("0.0.0.0{address}").parse()?
        } else {
            address.parse()?
        };
        Ok(addr)
    }
}
