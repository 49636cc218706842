//! Default configuration values
//!
//! This module provides default values for configuration options.
//! It is designed to be a single source of truth for defaults,
//! making it easier to maintain consistent defaults across the application.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::security::MICROSOFT_SIGNIN_DOMAINS;

/// Environment variable prefix for all configuration options
pub const ENV_PREFIX: &str = "CERT_SENTRY_";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

// String constants for default values

/// Default browser remote-debugging endpoint as string
pub const BROWSER_ENDPOINT_STR: &str = "127.0.0.1:9222";

/// Default status API listen address as string
pub const STATUS_LISTEN_STR: &str = "127.0.0.1:5598";

/// Default log level as string
pub const LOG_LEVEL_STR: &str = "info";

// Functions for default values

/// Default browser remote-debugging endpoint
pub fn browser_endpoint() -> SocketAddr {
    SocketAddr::from_str(BROWSER_ENDPOINT_STR)
        .expect("Default browser endpoint should be valid")
}

/// Default status API listen address
pub fn status_listen() -> SocketAddr {
    SocketAddr::from_str(STATUS_LISTEN_STR)
        .expect("Default status listen address should be valid")
}

/// Default watched sign-in domains
pub fn watched_domains() -> Vec<String> {
    MICROSOFT_SIGNIN_DOMAINS.iter().map(|d| d.to_string()).collect()
}

/// Default target poll interval in seconds
pub fn poll_interval_secs() -> u64 {
    3
}

/// Default security-state fetch timeout in milliseconds
pub fn fetch_timeout_ms() -> u64 {
    5000
}

/// Default log level
pub fn log_level() -> String {
    LOG_LEVEL_STR.to_string()
}
