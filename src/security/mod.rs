//! Security-state evaluation module
//!
//! This module contains the evaluation core: the security snapshot types
//! reported by the browser's debugging API, the verdict types produced per
//! navigation, the evaluator that maps one to the other, and the watchlist
//! of sign-in domains that triggers an evaluation in the first place.

pub mod evaluator;
pub mod snapshot;
pub mod verdict;
pub mod watchlist;

// Re-export commonly used types and functions
pub use evaluator::{evaluate_security_state, prevalidate_navigation};
pub use snapshot::{CertificateSecurityState, SecuritySnapshot, SecurityState};
pub use verdict::{Check, Severity, Verdict};
pub use watchlist::{Watchlist, MICROSOFT_SIGNIN_DOMAINS};
