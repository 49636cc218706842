//! Cert Sentry: TLS security sentinel for Microsoft sign-in pages
//!
//! This library watches a browser over its remote-debugging endpoint,
//! fetches the security state of tabs navigating to a fixed set of
//! Microsoft identity domains, and produces a structured verdict per
//! navigation: valid, warning, or invalid, with per-check detail.
//!
//! # Main Features
//!
//! - Pure security-state evaluator: snapshot in, verdict out, never errors
//! - One-shot DevTools sessions for snapshot acquisition, no subscriptions
//! - Verdict cache keyed by tab identity, evicted exactly on tab close
//! - Local status API with an embedded HTML status page
//!
//! # Example
//!
//! ```
//! use cert_sentry::security::evaluate_security_state;
//! use cert_sentry::security::SecuritySnapshot;
//!
//! let snapshot: SecuritySnapshot = serde_json::from_str(
//!     r#"{
//!         "securityState": "secure",
//!         "certificateSecurityState": {
//!             "protocol": "TLS 1.3",
//!             "subjectName": "login.microsoftonline.com"
//!         }
//!     }"#,
//! )?;
//!
//! let verdict = evaluate_security_state(Some(&snapshot), "login.microsoftonline.com");
//! assert!(verdict.valid);
//! # Ok::<(), serde_json::Error>(())
//! ```

// Public modules
pub mod common;
pub mod config;
pub mod inspect;
pub mod security;
pub mod status;

// Re-export commonly used structures and functions for convenience
pub use common::{Result, SentryError};
pub use inspect::{Monitor, VerdictCache};
pub use security::{evaluate_security_state, SecuritySnapshot, Verdict, Watchlist};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
