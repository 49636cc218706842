//! Configuration validator
//!
//! This module provides functionality for validating configuration.

use log::warn;

use crate::config::error::{ConfigError, Result};
use crate::config::types::SentryConfig;

/// Validate the configuration
pub fn validate_config(config: &SentryConfig) -> Result<()> {
    // Validate network settings
    validate_network_settings(config)?;

    // Validate watchlist settings
    validate_watchlist_settings(config)?;

    // Validate general settings
    validate_general_settings(config)?;

    Ok(())
}

/// Validate network settings
fn validate_network_settings(config: &SentryConfig) -> Result<()> {
    // The status API must not shadow the browser endpoint
    if config.status_listen() == config.browser_endpoint() {
        return Err(ConfigError::InvalidCombination(
            "Status listen address and browser endpoint must be different".to_string(),
        ));
    }

    Ok(())
}

/// Validate watchlist settings
fn validate_watchlist_settings(config: &SentryConfig) -> Result<()> {
    let domains = config.watched_domains();

    if domains.iter().all(|d| d.trim().is_empty()) {
        return Err(ConfigError::InvalidValue(
            "watched_domains".to_string(),
            "At least one watched domain is required".to_string(),
        ));
    }

    for domain in &domains {
        let domain = domain.trim();
        if domain.is_empty() {
            continue;
        }

        // Entries are bare hostnames, not URLs or host:port pairs
        if domain.contains('/') || domain.contains(':') || domain.contains(' ') {
            return Err(ConfigError::InvalidValue(
                "watched_domains".to_string(),
                format!("'{}' is not a bare hostname", domain),
            ));
        }
    }

    Ok(())
}

/// Validate general settings
fn validate_general_settings(config: &SentryConfig) -> Result<()> {
    // Validate log level
    match config.log_level() {
        "error" | "warn" | "info" | "debug" | "trace" => {}
        level => {
            warn!("Invalid log level: {}. Using default: info", level);
        }
    }

    // Validate poll interval
    if config.poll_interval_secs() == 0 {
        return Err(ConfigError::InvalidValue(
            "poll_interval_secs".to_string(),
            "Poll interval must be greater than 0".to_string(),
        ));
    }

    // Validate fetch timeout
    if config.fetch_timeout_ms() == 0 {
        return Err(ConfigError::InvalidValue(
            "fetch_timeout_ms".to_string(),
            "Fetch timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Configuration validator trait
pub trait ConfigValidator {
    /// Check configuration for warnings
    fn check_warnings(&self) -> Vec<String>;
}

impl ConfigValidator for SentryConfig {
    fn check_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        // A remote debugging endpoint grants full control of the browser to
        // anyone who can reach it
        if !self.browser_endpoint().ip().is_loopback() {
            warnings.push(format!(
                "Browser debugging endpoint {} is not loopback; the debugged browser is exposed to the network",
                self.browser_endpoint()
            ));
        }

        if !self.status_listen().ip().is_loopback() {
            warnings.push(format!(
                "Status API listen address {} is not loopback; verdicts will be visible to the network",
                self.status_listen()
            ));
        }

        if self.poll_interval_secs() > 60 {
            warnings.push(format!(
                "Poll interval of {} seconds will leave navigations unvalidated for a long time",
                self.poll_interval_secs()
            ));
        }

        warnings
    }
}
