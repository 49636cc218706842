//! Navigation monitor
//!
//! Polls the browser's target list and validates every watched page that
//! has not been judged yet (or navigated since it was). The monitor owns
//! the verdict cache and is the only writer to it; eviction happens on the
//! same sweep that discovers a tab is gone.
//!
//! Snapshot-acquisition failures never escape as errors here: per the
//! evaluator's contract they are converted into invalid verdicts with a
//! descriptive reason, so a tab the monitor cannot attach to still shows
//! up on the status surface.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::common::Result;
use crate::inspect::cache::VerdictCache;
use crate::inspect::discovery::{BrowserEndpoint, PageTarget};
use crate::inspect::fetcher::SnapshotFetcher;
use crate::security::{evaluate_security_state, prevalidate_navigation, Verdict, Watchlist};

/// Watches a browser's tabs and validates watched navigations
pub struct Monitor<F: SnapshotFetcher> {
    endpoint: BrowserEndpoint,
    fetcher: F,
    watchlist: Watchlist,
    cache: Arc<VerdictCache>,
    poll_interval: Duration,
}

impl<F: SnapshotFetcher> Monitor<F> {
    /// Create a monitor
    pub fn new(
        endpoint: BrowserEndpoint,
        fetcher: F,
        watchlist: Watchlist,
        cache: Arc<VerdictCache>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            endpoint,
            fetcher,
            watchlist,
            cache,
            poll_interval,
        }
    }

    /// Run the monitor loop
    ///
    /// Sweeps the target list on the configured interval. A failed sweep
    /// (browser restarting, endpoint briefly unreachable) is logged and
    /// retried on the next tick rather than terminating the loop.
    pub async fn run(&self) -> Result<()> {
        info!(
            "Monitoring {} for {} watched domains every {:?}",
            self.endpoint.base_url(),
            self.watchlist.len(),
            self.poll_interval
        );

        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;

            if let Err(e) = self.sweep().await {
                warn!("Target sweep failed: {}", e);
            }
        }
    }

    /// One pass over the browser's open pages
    pub async fn sweep(&self) -> Result<()> {
        let targets = self.endpoint.page_targets().await?;

        // Tab-close bookkeeping: drop verdicts for vanished targets first
        let live: HashSet<String> = targets.iter().map(|t| t.id.clone()).collect();
        let evicted = self.cache.retain(&live).await;
        if evicted > 0 {
            debug!("Evicted {} verdicts for closed tabs", evicted);
        }

        for target in &targets {
            if !self.is_watched(&target.url) {
                continue;
            }

            if !self.cache.needs_validation(&target.id, &target.url).await {
                continue;
            }

            let run_id = Uuid::new_v4();
            let verdict = self.validate_target(target).await;

            if verdict.valid {
                info!(
                    "[{}] {} valid{}",
                    run_id,
                    verdict.domain,
                    if verdict.warning { " (with warnings)" } else { "" }
                );
            } else {
                warn!(
                    "[{}] {} INVALID: {}",
                    run_id,
                    verdict.domain,
                    verdict.reason.as_deref().unwrap_or("no reason recorded")
                );
            }

            self.cache
                .insert(&target.id, &target.url, run_id, verdict)
                .await;
        }

        Ok(())
    }

    /// Validate one page target
    ///
    /// Never fails: screening rejections, snapshot fetch errors, and
    /// evaluation outcomes all come back as verdicts.
    pub async fn validate_target(&self, target: &PageTarget) -> Verdict {
        let url = match Url::parse(&target.url) {
            Ok(url) => url,
            Err(e) => {
                return Verdict::rejected(
                    &target.url,
                    format!("Error during validation: invalid target URL: {}", e),
                );
            }
        };

        if let Some(rejection) = prevalidate_navigation(&url, &self.watchlist) {
            return rejection;
        }

        // prevalidate_navigation guarantees a hostname at this point
        let hostname = url.host_str().unwrap_or_default().to_string();

        match self.fetcher.fetch(target).await {
            Ok(snapshot) => evaluate_security_state(Some(&snapshot), &hostname),
            Err(e) => Verdict::rejected(&hostname, format!("Error during validation: {}", e)),
        }
    }

    /// Whether a target URL's hostname is on the watchlist
    fn is_watched(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| self.watchlist.contains(h)))
            .unwrap_or(false)
    }

    /// The monitor's verdict cache
    pub fn cache(&self) -> &Arc<VerdictCache> {
        &self.cache
    }
}
