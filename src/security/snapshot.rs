//! Security snapshot types
//!
//! Deserialized form of the result of the DevTools Protocol
//! `Security.getSecurityState` command. Field names on the wire are
//! camelCase; serde handles the mapping. Every field the browser may omit
//! is optional or defaulted, so a partial snapshot still deserializes.

use serde::{Deserialize, Serialize};

/// Overall security state the browser assigned to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityState {
    /// Page is served over a valid, unbroken TLS connection
    Secure,
    /// Page is served insecurely (plain HTTP or downgraded)
    Insecure,
    /// Neither secure nor actively broken (e.g. local files)
    Neutral,
    /// Informational state used by some browser versions
    Info,
    /// TLS is present but broken (certificate errors, active content failures)
    #[serde(rename = "insecure-broken")]
    InsecureBroken,
    /// State not reported or not recognized
    #[serde(other)]
    Unknown,
}

impl Default for SecurityState {
    fn default() -> Self {
        SecurityState::Unknown
    }
}

/// Certificate-level security details for the active connection
///
/// Only the fields the evaluator consumes are modeled; the browser sends
/// more (key exchange, certificate chain, validity window) and serde
/// ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateSecurityState {
    /// Negotiated protocol version, e.g. "TLS 1.3"
    pub protocol: Option<String>,

    /// Negotiated cipher suite
    pub cipher: Option<String>,

    /// Certificate issuer name
    pub issuer: Option<String>,

    /// Certificate subject name
    pub subject_name: Option<String>,

    /// Network error hit while validating the certificate, if any
    pub certificate_network_error: Option<String>,

    /// Certificate is signed with a weak algorithm
    pub certificate_has_weak_signature: bool,

    /// Certificate carries a SHA-1 signature somewhere in its chain
    pub certificate_has_sha1_signature: bool,
}

/// Security snapshot for one page, as reported by the browser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySnapshot {
    /// Overall security state
    pub security_state: SecurityState,

    /// Certificate details, absent when the browser has none to report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_security_state: Option<CertificateSecurityState>,

    /// Identifiers of active security issues (e.g. mixed content)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_state_issue_ids: Vec<String>,
}

impl SecuritySnapshot {
    /// Shorthand for a snapshot whose overall state is `secure`
    pub fn is_secure(&self) -> bool {
        self.security_state == SecurityState::Secure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_snapshot() {
        // Shape of a real Security.getSecurityState result
        let raw = r#"{
            "securityState": "secure",
            "certificateSecurityState": {
                "protocol": "TLS 1.3",
                "cipher": "AES_128_GCM",
                "issuer": "Microsoft Azure TLS Issuing CA 01",
                "subjectName": "login.microsoftonline.com",
                "certificateHasWeakSignature": false,
                "certificateHasSha1Signature": false,
                "keyExchange": "X25519",
                "modernSSL": true
            },
            "securityStateIssueIds": []
        }"#;

        let snapshot: SecuritySnapshot = serde_json::from_str(raw).unwrap();
        assert!(snapshot.is_secure());

        let cert = snapshot.certificate_security_state.unwrap();
        assert_eq!(cert.protocol.as_deref(), Some("TLS 1.3"));
        assert_eq!(cert.subject_name.as_deref(), Some("login.microsoftonline.com"));
        assert!(cert.certificate_network_error.is_none());
    }

    #[test]
    fn test_deserialize_minimal_snapshot() {
        // Browsers may omit everything but the overall state
        let snapshot: SecuritySnapshot =
            serde_json::from_str(r#"{"securityState": "neutral"}"#).unwrap();

        assert_eq!(snapshot.security_state, SecurityState::Neutral);
        assert!(snapshot.certificate_security_state.is_none());
        assert!(snapshot.security_state_issue_ids.is_empty());
    }

    #[test]
    fn test_unrecognized_state_maps_to_unknown() {
        let snapshot: SecuritySnapshot =
            serde_json::from_str(r#"{"securityState": "something-new"}"#).unwrap();
        assert_eq!(snapshot.security_state, SecurityState::Unknown);

        let broken: SecuritySnapshot =
            serde_json::from_str(r#"{"securityState": "insecure-broken"}"#).unwrap();
        assert_eq!(broken.security_state, SecurityState::InsecureBroken);
    }
}
