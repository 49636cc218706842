//! Security-state evaluator
//!
//! Maps a browser security snapshot and a hostname to a structured verdict.
//! This is a deterministic decision table: each branch records a named check,
//! critical conditions stop the evaluation early, and validity is settled
//! once at the end by the reducer in [`Verdict::settle`].
//!
//! Known limitation: the subject-name check is a plain substring test. A
//! wildcard subject such as `*.microsoftonline.com` does not contain
//! `login.microsoftonline.com` and is therefore reported as a mismatch;
//! there is no RFC 6125 wildcard or SAN-list handling here.

use url::Url;

use super::snapshot::SecuritySnapshot;
use super::verdict::{Check, Severity, Verdict};
use super::watchlist::Watchlist;

/// Protocol versions that do not raise an outdated-TLS warning
const MODERN_PROTOCOLS: [&str; 2] = ["TLS 1.2", "TLS 1.3"];

/// Evaluate a security snapshot for a hostname
///
/// The evaluator is total: every input, including an absent snapshot,
/// produces a verdict. Errors in acquiring the snapshot are the caller's
/// concern and should be surfaced via [`Verdict::rejected`].
pub fn evaluate_security_state(snapshot: Option<&SecuritySnapshot>, hostname: &str) -> Verdict {
    let mut verdict = Verdict::pending(hostname);

    // Overall security state; anything but "secure" ends the evaluation
    let snapshot = match snapshot {
        Some(snapshot) if snapshot.is_secure() => snapshot,
        _ => {
            verdict.reason = Some("Connection is not secure".to_string());
            verdict.critical = true;
            verdict.checks.push(Check::fail(
                "TLS Security",
                "Connection is not marked as secure",
                Severity::Critical,
            ));
            return verdict.settle();
        }
    };

    verdict
        .checks
        .push(Check::pass("TLS Security", "Connection is secure"));

    // Certificate sub-checks run only when the browser reported cert details
    if let Some(cert) = &snapshot.certificate_security_state {
        if let Some(network_error) = &cert.certificate_network_error {
            verdict.reason = Some("Certificate network error detected".to_string());
            verdict.critical = true;
            verdict.checks.push(Check::fail(
                "Certificate Validity",
                format!("Network error: {}", network_error),
                Severity::Critical,
            ));
            return verdict.settle();
        }

        if cert.certificate_has_weak_signature {
            verdict.reason = Some("Weak certificate signature detected".to_string());
            verdict.warning = true;
            verdict.checks.push(Check::fail(
                "Certificate Strength",
                "Weak signature algorithm",
                Severity::Warning,
            ));
        } else {
            verdict
                .checks
                .push(Check::pass("Certificate Strength", "Strong signature algorithm"));
        }

        if cert.certificate_has_sha1_signature {
            verdict.reason = Some("Certificate uses deprecated SHA-1".to_string());
            verdict.warning = true;
            verdict.checks.push(Check::fail(
                "Modern Cryptography",
                "Uses deprecated SHA-1",
                Severity::Warning,
            ));
        } else {
            verdict
                .checks
                .push(Check::pass("Modern Cryptography", "Uses modern hash algorithm"));
        }

        // Substring containment only; see the module docs for why this
        // rejects wildcard subjects
        match &cert.subject_name {
            Some(subject) if !subject.contains(hostname) => {
                verdict.reason = Some("Certificate subject name mismatch".to_string());
                verdict.critical = true;
                verdict.checks.push(Check::fail(
                    "Certificate Name Match",
                    format!("Expected: {}, Got: {}", hostname, subject),
                    Severity::Critical,
                ));
                return verdict.settle();
            }
            _ => {
                verdict
                    .checks
                    .push(Check::pass("Certificate Name Match", "Certificate matches domain"));
            }
        }

        if let Some(issuer) = &cert.issuer {
            verdict.issuer = Some(issuer.clone());
            verdict
                .checks
                .push(Check::pass("Certificate Issuer", issuer.clone()));
        }

        if let Some(protocol) = &cert.protocol {
            verdict.protocol = Some(protocol.clone());
            let modern = MODERN_PROTOCOLS.contains(&protocol.as_str());

            if modern {
                verdict
                    .checks
                    .push(Check::pass("Protocol Version", protocol.clone()));
            } else {
                verdict.reason = Some("Using outdated TLS version".to_string());
                verdict.warning = true;
                verdict.checks.push(Check::fail(
                    "Protocol Version",
                    protocol.clone(),
                    Severity::Warning,
                ));
            }
        }

        if let Some(cipher) = &cert.cipher {
            verdict.cipher = Some(cipher.clone());
            verdict.checks.push(Check::pass("Cipher Suite", cipher.clone()));
        }
    }

    // Mixed/insecure content issues, reported independently of cert state
    let has_mixed_content = snapshot
        .security_state_issue_ids
        .iter()
        .any(|id| id.contains("mixed-content") || id.contains("insecure"));

    if has_mixed_content {
        verdict.reason = Some("Mixed content detected".to_string());
        verdict.warning = true;
        verdict.checks.push(Check::fail(
            "Content Security",
            "Page contains mixed/insecure content",
            Severity::Warning,
        ));
    }

    verdict.settle()
}

/// Screen a navigation before any snapshot is fetched
///
/// Returns a rejection verdict for URLs that should never reach the
/// evaluator: hosts outside the watchlist, and non-HTTPS schemes. `None`
/// means the navigation qualifies for a snapshot fetch.
pub fn prevalidate_navigation(url: &Url, watchlist: &Watchlist) -> Option<Verdict> {
    let hostname = match url.host_str() {
        Some(host) => host,
        None => return Some(Verdict::rejected(url.as_str(), "URL has no hostname")),
    };

    if !watchlist.contains(hostname) {
        return Some(Verdict::rejected(hostname, "Not a watched sign-in domain"));
    }

    if url.scheme() != "https" {
        return Some(Verdict::rejected_critical(hostname, "Not using HTTPS"));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::snapshot::{CertificateSecurityState, SecurityState};

    fn secure_snapshot() -> SecuritySnapshot {
        SecuritySnapshot {
            security_state: SecurityState::Secure,
            certificate_security_state: None,
            security_state_issue_ids: Vec::new(),
        }
    }

    fn clean_cert(hostname: &str) -> CertificateSecurityState {
        CertificateSecurityState {
            protocol: Some("TLS 1.3".to_string()),
            cipher: Some("AES_128_GCM".to_string()),
            issuer: Some("Microsoft Azure TLS Issuing CA 01".to_string()),
            subject_name: Some(hostname.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_snapshot_is_critical() {
        let verdict = evaluate_security_state(None, "login.live.com");
        assert!(!verdict.valid);
        assert!(verdict.critical);
        assert_eq!(verdict.checks.len(), 1);
        assert_eq!(verdict.checks[0].name, "TLS Security");
        assert!(!verdict.checks[0].passed);
    }

    #[test]
    fn test_insecure_state_stops_early() {
        let mut snapshot = secure_snapshot();
        snapshot.security_state = SecurityState::InsecureBroken;
        // Certificate details must not be inspected past the state gate
        snapshot.certificate_security_state = Some(clean_cert("login.live.com"));

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(!verdict.valid);
        assert!(verdict.critical);
        assert_eq!(verdict.reason.as_deref(), Some("Connection is not secure"));
        assert_eq!(verdict.checks.len(), 1);
    }

    #[test]
    fn test_secure_without_cert_details_is_valid() {
        let verdict = evaluate_security_state(Some(&secure_snapshot()), "login.live.com");
        assert!(verdict.valid);
        assert!(!verdict.warning);
        assert_eq!(verdict.reason.as_deref(), Some("All security checks passed"));
        assert_eq!(verdict.checks.len(), 1);
        assert!(verdict.checks[0].passed);
    }

    #[test]
    fn test_network_error_stops_after_validity_check() {
        let mut snapshot = secure_snapshot();
        let mut cert = clean_cert("login.live.com");
        cert.certificate_network_error = Some("net::ERR_CERT_REVOKED".to_string());
        snapshot.certificate_security_state = Some(cert);

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(!verdict.valid);
        assert!(verdict.critical);
        let names: Vec<&str> = verdict.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["TLS Security", "Certificate Validity"]);
        assert!(verdict.checks[1].detail.contains("net::ERR_CERT_REVOKED"));
    }

    #[test]
    fn test_weak_signature_warns_but_stays_valid() {
        let mut snapshot = secure_snapshot();
        let mut cert = clean_cert("login.live.com");
        cert.certificate_has_weak_signature = true;
        snapshot.certificate_security_state = Some(cert);

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(verdict.valid);
        assert!(verdict.warning);
        assert!(!verdict.critical);
        assert_eq!(verdict.reason.as_deref(), Some("Weak certificate signature detected"));

        let strength = verdict
            .checks
            .iter()
            .find(|c| c.name == "Certificate Strength")
            .unwrap();
        assert!(!strength.passed);
    }

    #[test]
    fn test_wildcard_subject_fails_substring_match() {
        let mut snapshot = secure_snapshot();
        let mut cert = clean_cert("login.microsoftonline.com");
        cert.subject_name = Some("*.microsoftonline.com".to_string());
        snapshot.certificate_security_state = Some(cert);

        let verdict = evaluate_security_state(Some(&snapshot), "login.microsoftonline.com");
        assert!(!verdict.valid);
        assert!(verdict.critical);
        assert_eq!(verdict.reason.as_deref(), Some("Certificate subject name mismatch"));

        // Evaluation stopped before the issuer/protocol/cipher checks
        let last = verdict.checks.last().unwrap();
        assert_eq!(last.name, "Certificate Name Match");
        assert!(verdict.issuer.is_none());
    }

    #[test]
    fn test_missing_subject_passes_name_match() {
        let mut snapshot = secure_snapshot();
        let mut cert = clean_cert("login.live.com");
        cert.subject_name = None;
        snapshot.certificate_security_state = Some(cert);

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(verdict.valid);
        let name_match = verdict
            .checks
            .iter()
            .find(|c| c.name == "Certificate Name Match")
            .unwrap();
        assert!(name_match.passed);
    }

    #[test]
    fn test_outdated_protocol_warns() {
        let mut snapshot = secure_snapshot();
        let mut cert = clean_cert("login.live.com");
        cert.protocol = Some("TLS 1.0".to_string());
        snapshot.certificate_security_state = Some(cert);

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(verdict.valid);
        assert!(verdict.warning);
        assert_eq!(verdict.reason.as_deref(), Some("Using outdated TLS version"));
        assert_eq!(verdict.protocol.as_deref(), Some("TLS 1.0"));

        let protocol = verdict
            .checks
            .iter()
            .find(|c| c.name == "Protocol Version")
            .unwrap();
        assert!(!protocol.passed);
    }

    #[test]
    fn test_mixed_content_warns() {
        let mut snapshot = secure_snapshot();
        snapshot.security_state_issue_ids = vec!["mixed-content-displayed".to_string()];

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(verdict.valid);
        assert!(verdict.warning);
        assert_eq!(verdict.reason.as_deref(), Some("Mixed content detected"));

        let content = verdict.checks.last().unwrap();
        assert_eq!(content.name, "Content Security");
        assert!(!content.passed);
    }

    #[test]
    fn test_clean_certificate_records_informational_checks() {
        let mut snapshot = secure_snapshot();
        snapshot.certificate_security_state = Some(clean_cert("login.live.com"));

        let verdict = evaluate_security_state(Some(&snapshot), "login.live.com");
        assert!(verdict.valid);
        assert!(!verdict.warning);
        assert_eq!(verdict.issuer.as_deref(), Some("Microsoft Azure TLS Issuing CA 01"));
        assert_eq!(verdict.protocol.as_deref(), Some("TLS 1.3"));
        assert_eq!(verdict.cipher.as_deref(), Some("AES_128_GCM"));

        let names: Vec<&str> = verdict.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "TLS Security",
                "Certificate Strength",
                "Modern Cryptography",
                "Certificate Name Match",
                "Certificate Issuer",
                "Protocol Version",
                "Cipher Suite",
            ]
        );
    }

    #[test]
    fn test_prevalidate_unwatched_host() {
        let url = Url::parse("https://example.com/login").unwrap();
        let verdict = prevalidate_navigation(&url, &Watchlist::default()).unwrap();
        assert!(!verdict.valid);
        assert!(!verdict.critical);
        assert_eq!(verdict.reason.as_deref(), Some("Not a watched sign-in domain"));
    }

    #[test]
    fn test_prevalidate_plain_http() {
        let url = Url::parse("http://login.live.com/").unwrap();
        let verdict = prevalidate_navigation(&url, &Watchlist::default()).unwrap();
        assert!(!verdict.valid);
        assert!(verdict.critical);
        assert_eq!(verdict.reason.as_deref(), Some("Not using HTTPS"));
    }

    #[test]
    fn test_prevalidate_watched_https_passes() {
        let url = Url::parse("https://login.live.com/oauth20_authorize.srf").unwrap();
        assert!(prevalidate_navigation(&url, &Watchlist::default()).is_none());
    }
}
