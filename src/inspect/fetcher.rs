//! Snapshot fetcher seam
//!
//! The monitor talks to the browser through this trait so the fetch path
//! can be swapped out in tests. The production implementation drives a
//! one-shot DevTools session per request.

use std::time::Duration;

use tokio::time::timeout;

use crate::common::{Result, SentryError};
use crate::inspect::cdp::CdpSession;
use crate::inspect::discovery::PageTarget;
use crate::security::SecuritySnapshot;

/// Fetches one security snapshot for a page target
pub trait SnapshotFetcher: Send + Sync {
    /// Fetch the current security snapshot for `target`
    ///
    /// One fetch per validation request; implementations must not retry.
    #[allow(async_fn_in_trait)]
    async fn fetch(&self, target: &PageTarget) -> Result<SecuritySnapshot>;
}

/// Production fetcher: attach, query, detach over DevTools
#[derive(Debug, Clone)]
pub struct CdpSnapshotFetcher {
    fetch_timeout: Duration,
}

impl CdpSnapshotFetcher {
    /// Create a fetcher with the given per-request timeout
    pub fn new(fetch_timeout: Duration) -> Self {
        Self { fetch_timeout }
    }
}

impl SnapshotFetcher for CdpSnapshotFetcher {
    async fn fetch(&self, target: &PageTarget) -> Result<SecuritySnapshot> {
        let ws_url = target.web_socket_debugger_url.as_deref().ok_or_else(|| {
            SentryError::Inspect(format!("target {} exposes no debugger URL", target.id))
        })?;

        let fetch = async {
            let mut session = CdpSession::attach(ws_url).await?;
            let snapshot = session.fetch_security_state().await;
            // Detach regardless of the fetch outcome
            let _ = session.detach().await;
            snapshot
        };

        match timeout(self.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(SentryError::Inspect(format!(
                "timed out fetching security state for target {}",
                target.id
            ))),
        }
    }
}
