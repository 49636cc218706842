//! Configuration module
//!
//! This module handles application configuration, including loading from
//! different sources (files, environment variables, command line arguments)
//! and validating the configuration. Every value carries its source, so the
//! effective configuration can be explained at startup.

mod builder;
pub mod defaults;
mod error;
mod source;
mod types;
mod validator;

// Re-export types and traits
pub use self::builder::ConfigBuilder;
pub use self::defaults::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use self::error::ConfigError;
pub use self::source::{ConfigSource, DefaultSource, EnvSource, FileSource};
pub use self::types::{ConfigValues, SentryConfig, ValueSource};
pub use self::validator::{validate_config, ConfigValidator};
