//! Configuration sources
//!
//! This module defines traits and implementations for loading configuration
//! from different sources.

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::error::{ConfigError, Result};
use crate::config::types::{parse_socket_addr, ConfigValues, SentryConfig, ValueSource};

/// Configuration source trait
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<SentryConfig>;

    /// Get the source type
    fn source_type(&self) -> ValueSource;
}

/// Default configuration source
pub struct DefaultSource;

impl ConfigSource for DefaultSource {
    fn load(&self) -> Result<SentryConfig> {
        debug!("Loading default configuration");
        Ok(SentryConfig::default())
    }

    fn source_type(&self) -> ValueSource {
        ValueSource::Default
    }
}

/// File configuration source
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    /// Create a new file source
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<SentryConfig> {
        debug!("Loading configuration from file: {}", self.path.display());

        // A missing file is not an error; the other sources still apply
        if !self.path.exists() {
            warn!("Configuration file not found: {}", self.path.display());
            warn!("Will use default values unless overridden by environment variables or command line arguments");
            return Ok(SentryConfig {
                values: ConfigValues::default(),
                config_file: None,
                sources: HashMap::new(),
            });
        }

        let mut contents = String::new();
        let mut file = File::open(&self.path)
            .map_err(|e| ConfigError::FileReadError(self.path.clone(), e.to_string()))?;

        file.read_to_string(&mut contents)
            .map_err(|e| ConfigError::FileReadError(self.path.clone(), e.to_string()))?;

        let values: ConfigValues = serde_json::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("Error parsing {}: {}", self.path.display(), e))
        })?;

        let mut sources = HashMap::new();
        track_set_fields(&values, &mut sources, ValueSource::File);

        Ok(SentryConfig {
            values,
            config_file: Some(self.path.clone()),
            sources,
        })
    }

    fn source_type(&self) -> ValueSource {
        ValueSource::File
    }
}

/// Environment variable configuration source
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    /// Create a new environment source with the given variable prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.prefix, name)).ok()
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<SentryConfig> {
        debug!("Loading configuration from environment variables with prefix {}", self.prefix);

        let mut values = ConfigValues::default();

        if let Some(value) = self.get("BROWSER_ENDPOINT") {
            values.browser_endpoint = Some(parse_socket_addr(&value)?);
        }

        if let Some(value) = self.get("STATUS_LISTEN") {
            values.status_listen = Some(parse_socket_addr(&value)?);
        }

        if let Some(value) = self.get("WATCHED_DOMAINS") {
            let domains: Vec<String> = value
                .split(',')
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
            values.watched_domains = Some(domains);
        }

        if let Some(value) = self.get("POLL_INTERVAL_SECS") {
            let parsed = value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("poll_interval_secs".to_string(), e.to_string())
            })?;
            values.poll_interval_secs = Some(parsed);
        }

        if let Some(value) = self.get("FETCH_TIMEOUT_MS") {
            let parsed = value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("fetch_timeout_ms".to_string(), e.to_string())
            })?;
            values.fetch_timeout_ms = Some(parsed);
        }

        if let Some(value) = self.get("LOG_LEVEL") {
            values.log_level = Some(value);
        }

        let mut sources = HashMap::new();
        track_set_fields(&values, &mut sources, ValueSource::Environment);

        Ok(SentryConfig {
            values,
            config_file: None,
            sources,
        })
    }

    fn source_type(&self) -> ValueSource {
        ValueSource::Environment
    }
}

/// Record a source for every field a partial configuration actually sets
fn track_set_fields(
    values: &ConfigValues,
    sources: &mut HashMap<String, ValueSource>,
    source: ValueSource,
) {
    macro_rules! track {
        ($field:expr, $name:ident) => {
            if values.$name.is_some() {
                sources.insert($field.to_string(), source);
            }
        };
    }

    track!("browser_endpoint", browser_endpoint);
    track!("watched_domains", watched_domains);
    track!("status_listen", status_listen);
    track!("poll_interval_secs", poll_interval_secs);
    track!("fetch_timeout_ms", fetch_timeout_ms);
    track!("log_level", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source() {
        let config = DefaultSource.load().unwrap();
        assert_eq!(config.browser_endpoint().port(), 9222);
        assert_eq!(DefaultSource.source_type(), ValueSource::Default);
    }

    #[test]
    fn test_missing_file_yields_empty_config() {
        let source = FileSource::new("definitely-not-a-real-config.json");
        let config = source.load().unwrap();
        assert!(config.values.browser_endpoint.is_none());
        assert!(config.sources.is_empty());
    }
}
