//! Monitor behavior tests
//!
//! Validates the monitor's caller-side contract with a stub fetcher: screening
//! rejections, fetch failures surfaced as invalid verdicts, and evaluation of
//! successfully fetched snapshots. The browser endpoint is never contacted.

use std::sync::Arc;
use std::time::Duration;

use cert_sentry::common::{Result, SentryError};
use cert_sentry::inspect::{BrowserEndpoint, Monitor, PageTarget, SnapshotFetcher, VerdictCache};
use cert_sentry::security::{SecuritySnapshot, SecurityState, Watchlist};

/// Fetcher returning a canned result
struct StubFetcher(std::result::Result<SecuritySnapshot, String>);

impl SnapshotFetcher for StubFetcher {
    async fn fetch(&self, _target: &PageTarget) -> Result<SecuritySnapshot> {
        match &self.0 {
            Ok(snapshot) => Ok(snapshot.clone()),
            Err(message) => Err(SentryError::Inspect(message.clone())),
        }
    }
}

fn page(url: &str) -> PageTarget {
    PageTarget {
        id: "TAB1".to_string(),
        target_type: "page".to_string(),
        url: url.to_string(),
        title: String::new(),
        web_socket_debugger_url: None,
    }
}

fn monitor_with(fetcher: StubFetcher) -> Monitor<StubFetcher> {
    Monitor::new(
        // Unroutable endpoint; validate_target never touches it
        BrowserEndpoint::new("127.0.0.1:9".parse().unwrap()),
        fetcher,
        Watchlist::default(),
        Arc::new(VerdictCache::new()),
        Duration::from_secs(3),
    )
}

fn secure_snapshot() -> SecuritySnapshot {
    SecuritySnapshot {
        security_state: SecurityState::Secure,
        certificate_security_state: None,
        security_state_issue_ids: Vec::new(),
    }
}

#[tokio::test]
async fn fetched_snapshot_is_evaluated() {
    let monitor = monitor_with(StubFetcher(Ok(secure_snapshot())));

    let verdict = monitor
        .validate_target(&page("https://login.live.com/oauth20_authorize.srf"))
        .await;

    assert!(verdict.valid);
    assert_eq!(verdict.domain, "login.live.com");
    assert!(!verdict.checks.is_empty());
}

#[tokio::test]
async fn fetch_failure_becomes_invalid_verdict() {
    let monitor = monitor_with(StubFetcher(Err("timed out fetching security state".to_string())));

    let verdict = monitor
        .validate_target(&page("https://login.live.com/"))
        .await;

    assert!(!verdict.valid);
    assert_eq!(verdict.domain, "login.live.com");
    let reason = verdict.reason.unwrap();
    assert!(reason.starts_with("Error during validation:"));
    assert!(reason.contains("timed out fetching security state"));
    // Fetch failures have no checks to show; the reason carries everything
    assert!(verdict.checks.is_empty());
}

#[tokio::test]
async fn unwatched_host_is_rejected_without_fetching() {
    // A fetch here would fail loudly; rejection must come first
    let monitor = monitor_with(StubFetcher(Err("fetch must not happen".to_string())));

    let verdict = monitor.validate_target(&page("https://example.com/login")).await;

    assert!(!verdict.valid);
    assert_eq!(verdict.reason.as_deref(), Some("Not a watched sign-in domain"));
}

#[tokio::test]
async fn plain_http_is_rejected_as_critical() {
    let monitor = monitor_with(StubFetcher(Err("fetch must not happen".to_string())));

    let verdict = monitor.validate_target(&page("http://login.live.com/")).await;

    assert!(!verdict.valid);
    assert!(verdict.critical);
    assert_eq!(verdict.reason.as_deref(), Some("Not using HTTPS"));
}

#[tokio::test]
async fn unparseable_target_url_is_rejected() {
    let monitor = monitor_with(StubFetcher(Ok(secure_snapshot())));

    let verdict = monitor.validate_target(&page("not a url at all")).await;

    assert!(!verdict.valid);
    assert!(verdict.reason.unwrap().contains("invalid target URL"));
}
