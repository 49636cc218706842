//! Verdict types
//!
//! The structured result produced for each validated navigation: an ordered
//! list of named checks plus the flat validity/warning flags the UI keys on.
//! Validity is settled once, by an explicit reducer over the recorded
//! checks, rather than inferred from control flow along the way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity a check failure carries into the validity reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational; never affects the verdict
    #[default]
    Info,
    /// Sets the warning flag, leaves validity untouched
    Warning,
    /// Flips the verdict to invalid
    Critical,
}

/// One named sub-assessment with a boolean outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Check name, e.g. "Certificate Strength"
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Explanatory detail text
    pub detail: String,

    /// Severity of a failure; not part of the serialized record
    #[serde(skip)]
    pub severity: Severity,
}

impl Check {
    /// Record a passing check
    pub fn pass(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            detail: detail.into(),
            severity: Severity::Info,
        }
    }

    /// Record a failing check at the given severity
    pub fn fail(name: &str, detail: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            detail: detail.into(),
            severity,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Structured validation verdict for one navigation
///
/// Serializes to the flat record consumed by the status UI: boolean flags
/// that are false and optional fields that are absent are omitted from the
/// JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Overall validity of the page's TLS state
    pub valid: bool,

    /// Hostname the verdict applies to
    pub domain: String,

    /// When the verdict was produced
    pub timestamp: DateTime<Utc>,

    /// Ordered list of recorded checks
    pub checks: Vec<Check>,

    /// Human-readable explanation of the outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// A critical condition was hit
    #[serde(default, skip_serializing_if = "is_false")]
    pub critical: bool,

    /// A non-critical issue was observed
    #[serde(default, skip_serializing_if = "is_false")]
    pub warning: bool,

    /// Certificate issuer, when the snapshot reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Negotiated protocol version, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Negotiated cipher suite, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher: Option<String>,
}

impl Verdict {
    /// Create an unsettled verdict with no checks recorded yet
    pub(crate) fn pending(domain: &str) -> Self {
        Self {
            valid: false,
            domain: domain.to_string(),
            timestamp: Utc::now(),
            checks: Vec::new(),
            reason: None,
            critical: false,
            warning: false,
            issuer: None,
            protocol: None,
            cipher: None,
        }
    }

    /// Verdict for a navigation rejected before any snapshot was fetched
    ///
    /// Used by callers for conditions the evaluator never sees: a hostname
    /// outside the watchlist, or a failure to acquire the snapshot at all.
    pub fn rejected(domain: &str, reason: impl Into<String>) -> Self {
        let mut verdict = Self::pending(domain);
        verdict.reason = Some(reason.into());
        verdict
    }

    /// Like [`Verdict::rejected`], but flagged as a critical condition
    pub fn rejected_critical(domain: &str, reason: impl Into<String>) -> Self {
        let mut verdict = Self::rejected(domain, reason);
        verdict.critical = true;
        verdict
    }

    /// Settle validity from the recorded checks
    ///
    /// The reduction rule: the verdict is valid exactly when no check failed
    /// at critical severity. Warning-level failures set the warning flag
    /// elsewhere but never flip validity. A valid verdict with no recorded
    /// reason gets the standard all-clear text.
    pub fn settle(mut self) -> Self {
        self.valid = !self
            .checks
            .iter()
            .any(|check| !check.passed && check.severity == Severity::Critical);

        if self.valid && self.reason.is_none() {
            self.reason = Some("All security checks passed".to_string());
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_no_checks_is_valid() {
        let verdict = Verdict::pending("login.live.com").settle();
        assert!(verdict.valid);
        assert_eq!(verdict.reason.as_deref(), Some("All security checks passed"));
    }

    #[test]
    fn test_settle_warning_failure_keeps_validity() {
        let mut verdict = Verdict::pending("login.live.com");
        verdict.checks.push(Check::pass("TLS Security", "Connection is secure"));
        verdict.checks.push(Check::fail(
            "Certificate Strength",
            "Weak signature algorithm",
            Severity::Warning,
        ));
        verdict.warning = true;
        verdict.reason = Some("Weak certificate signature detected".to_string());

        let verdict = verdict.settle();
        assert!(verdict.valid);
        assert!(verdict.warning);
        // A pre-recorded reason is not overwritten by the all-clear text
        assert_eq!(verdict.reason.as_deref(), Some("Weak certificate signature detected"));
    }

    #[test]
    fn test_settle_critical_failure_flips_validity() {
        let mut verdict = Verdict::pending("login.live.com");
        verdict.checks.push(Check::fail(
            "TLS Security",
            "Connection is not marked as secure",
            Severity::Critical,
        ));

        assert!(!verdict.clone().settle().valid);

        // A later passing check does not rescue the verdict
        verdict.checks.push(Check::pass("Cipher Suite", "AES_128_GCM"));
        assert!(!verdict.settle().valid);
    }

    #[test]
    fn test_serialized_shape_omits_unset_fields() {
        let verdict = Verdict::rejected("example.com", "Not a watched sign-in domain");
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["valid"], serde_json::json!(false));
        assert_eq!(json["domain"], serde_json::json!("example.com"));
        // False flags and absent options disappear from the wire record
        assert!(json.get("critical").is_none());
        assert!(json.get("warning").is_none());
        assert!(json.get("issuer").is_none());

        // Checks serialize as {name, passed, detail} only
        let mut verdict = verdict;
        verdict.checks.push(Check::pass("TLS Security", "Connection is secure"));
        let json = serde_json::to_value(&verdict).unwrap();
        let check = &json["checks"][0];
        assert_eq!(check["name"], serde_json::json!("TLS Security"));
        assert!(check.get("severity").is_none());
    }
}
