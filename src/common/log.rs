//! Logging utilities
//!
//! This module provides helpers for initializing the logging system.

/// Initialize the logging system
///
/// # Parameters
///
/// * `level` - Default log level, overridden by `RUST_LOG`
pub fn init_logger(level: &str) {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", level);

    env_logger::init_from_env(env);
}
