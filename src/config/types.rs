//! Configuration types
//!
//! This module contains the main configuration types used throughout the application.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::defaults;
use crate::config::error::{ConfigError, Result};
use crate::security::Watchlist;

/// Source of a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueSource {
    /// Default value
    Default,
    /// From configuration file
    File,
    /// From environment variable
    Environment,
    /// From command line argument
    CommandLine,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Default => write!(f, "default"),
            ValueSource::File => write!(f, "file"),
            ValueSource::Environment => write!(f, "environment"),
            ValueSource::CommandLine => write!(f, "command line"),
        }
    }
}

/// Custom deserializer for socket addresses
fn deserialize_socket_addr<'de, D>(deserializer: D) -> std::result::Result<Option<SocketAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    match s {
        Some(addr_str) => parse_socket_addr(&addr_str)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Parse a socket address string
pub fn parse_socket_addr(addr: &str) -> Result<SocketAddr> {
    crate::common::parse_socket_addr(addr).map_err(|e| {
        ConfigError::InvalidValue("socket_addr".to_string(), e.to_string())
    })
}

/// Configuration values
///
/// Contains all configuration values with their optional state. A `None`
/// field means "not set by this source"; defaults are applied once all
/// sources have been merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigValues {
    // --- Browser settings ---

    /// Browser remote-debugging endpoint (host:port)
    #[serde(default, deserialize_with = "deserialize_socket_addr")]
    pub browser_endpoint: Option<SocketAddr>,

    /// Hostnames whose navigations are validated
    #[serde(default)]
    pub watched_domains: Option<Vec<String>>,

    // --- Status API settings ---

    /// Listen address for the local status API (host:port)
    #[serde(default, deserialize_with = "deserialize_socket_addr")]
    pub status_listen: Option<SocketAddr>,

    // --- General settings ---

    /// Target poll interval in seconds
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,

    /// Security-state fetch timeout in milliseconds
    #[serde(default)]
    pub fetch_timeout_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for ConfigValues {
    fn default() -> Self {
        Self {
            // All fields are None by default
            browser_endpoint: None,
            watched_domains: None,
            status_listen: None,
            poll_interval_secs: None,
            fetch_timeout_ms: None,
            log_level: None,
        }
    }
}

/// Sentry configuration
///
/// Contains all configuration options for the service. Supports loading
/// from configuration files, environment variables, and command-line
/// arguments, with source tracking for every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentryConfig {
    /// Configuration values
    pub values: ConfigValues,

    /// Configuration file path
    pub config_file: Option<PathBuf>,

    /// Source tracking for configuration values
    pub sources: HashMap<String, ValueSource>,
}

impl std::ops::Deref for SentryConfig {
    type Target = ConfigValues;

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl Serialize for SentryConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SentryConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = ConfigValues::deserialize(deserializer)?;
        Ok(Self {
            values,
            config_file: None,
            sources: HashMap::new(),
        })
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        let mut config = Self {
            values: ConfigValues::default(),
            config_file: None,
            sources: HashMap::new(),
        };

        // Apply default values and track their source
        config.set_default_values();

        config
    }
}

impl SentryConfig {
    /// Set default values for all configuration options still unset
    pub fn set_default_values(&mut self) {
        if self.values.browser_endpoint.is_none() {
            self.values.browser_endpoint = Some(defaults::browser_endpoint());
            self.sources.insert("browser_endpoint".to_string(), ValueSource::Default);
        }

        if self.values.watched_domains.is_none() {
            self.values.watched_domains = Some(defaults::watched_domains());
            self.sources.insert("watched_domains".to_string(), ValueSource::Default);
        }

        if self.values.status_listen.is_none() {
            self.values.status_listen = Some(defaults::status_listen());
            self.sources.insert("status_listen".to_string(), ValueSource::Default);
        }

        if self.values.poll_interval_secs.is_none() {
            self.values.poll_interval_secs = Some(defaults::poll_interval_secs());
            self.sources.insert("poll_interval_secs".to_string(), ValueSource::Default);
        }

        if self.values.fetch_timeout_ms.is_none() {
            self.values.fetch_timeout_ms = Some(defaults::fetch_timeout_ms());
            self.sources.insert("fetch_timeout_ms".to_string(), ValueSource::Default);
        }

        if self.values.log_level.is_none() {
            self.values.log_level = Some(defaults::LOG_LEVEL_STR.to_string());
            self.sources.insert("log_level".to_string(), ValueSource::Default);
        }
    }

    /// Get the source of a configuration value
    pub fn source(&self, name: &str) -> &str {
        match self.sources.get(name) {
            Some(ValueSource::Default) => "default",
            Some(ValueSource::File) => "file",
            Some(ValueSource::Environment) => "environment",
            Some(ValueSource::CommandLine) => "command line",
            None => "unknown",
        }
    }

    /// Get the browser remote-debugging endpoint
    pub fn browser_endpoint(&self) -> SocketAddr {
        self.values
            .browser_endpoint
            .unwrap_or_else(defaults::browser_endpoint)
    }

    /// Get the watched sign-in domains
    pub fn watched_domains(&self) -> Vec<String> {
        self.values
            .watched_domains
            .clone()
            .unwrap_or_else(defaults::watched_domains)
    }

    /// Build the watchlist from the configured domains
    pub fn watchlist(&self) -> Watchlist {
        Watchlist::new(self.watched_domains())
    }

    /// Get the status API listen address
    pub fn status_listen(&self) -> SocketAddr {
        self.values
            .status_listen
            .unwrap_or_else(defaults::status_listen)
    }

    /// Get the target poll interval in seconds
    pub fn poll_interval_secs(&self) -> u64 {
        self.values
            .poll_interval_secs
            .unwrap_or_else(defaults::poll_interval_secs)
    }

    /// Get the security-state fetch timeout in milliseconds
    pub fn fetch_timeout_ms(&self) -> u64 {
        self.values
            .fetch_timeout_ms
            .unwrap_or_else(defaults::fetch_timeout_ms)
    }

    /// Get the log level
    pub fn log_level(&self) -> &str {
        self.values.log_level.as_deref().unwrap_or(defaults::LOG_LEVEL_STR)
    }

    /// Get the configuration file path
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Merge two configurations
    ///
    /// Values set in `other` override values in `self` and are attributed
    /// to `source`.
    pub fn merge(&self, other: &SentryConfig, source: ValueSource) -> Self {
        let mut result = self.clone();

        macro_rules! merge_field {
            ($field:expr, $name:ident) => {
                if other.values.$name.is_some() {
                    result.values.$name = other.values.$name.clone();
                    result.sources.insert($field.to_string(), source);
                }
            };
        }

        // Browser settings
        merge_field!("browser_endpoint", browser_endpoint);
        merge_field!("watched_domains", watched_domains);

        // Status API settings
        merge_field!("status_listen", status_listen);

        // General settings
        merge_field!("poll_interval_secs", poll_interval_secs);
        merge_field!("fetch_timeout_ms", fetch_timeout_ms);
        merge_field!("log_level", log_level);

        // Configuration file path
        if let Some(path) = &other.config_file {
            result.config_file = Some(path.clone());
        }

        result
    }

    /// Log the configuration
    pub fn log(&self) {
        debug!("=== Configuration ===");
        debug!("Browser settings:");
        debug!("  Debugging endpoint: {} (from {})", self.browser_endpoint(), self.source("browser_endpoint"));
        debug!("  Watched domains: {} (from {})", self.watched_domains().join(", "), self.source("watched_domains"));

        debug!("Status API settings:");
        debug!("  Listen address: {} (from {})", self.status_listen(), self.source("status_listen"));

        debug!("General settings:");
        debug!("  Poll interval: {} seconds (from {})", self.poll_interval_secs(), self.source("poll_interval_secs"));
        debug!("  Fetch timeout: {} ms (from {})", self.fetch_timeout_ms(), self.source("fetch_timeout_ms"));
        debug!("  Log level: {} (from {})", self.log_level(), self.source("log_level"));

        if let Some(file) = self.config_file() {
            debug!("  Configuration file: {}", file.display());
        }

        debug!("=====================");
    }
}
