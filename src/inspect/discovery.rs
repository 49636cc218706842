//! Browser endpoint discovery
//!
//! HTTP client for the browser's remote-debugging endpoint: the
//! `/json/version` identity document and the `/json/list` target list.
//! Everything here is a single-shot request; the WebSocket side of the
//! protocol lives in [`crate::inspect::cdp`].

use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::common::Result;

/// One debuggable target from `/json/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTarget {
    /// Stable target identifier, also the verdict cache key
    pub id: String,

    /// Target kind; only `"page"` targets are inspected
    #[serde(rename = "type")]
    pub target_type: String,

    /// Current URL of the target
    pub url: String,

    /// Page title, when available
    #[serde(default)]
    pub title: String,

    /// WebSocket URL for attaching a DevTools session
    #[serde(default)]
    pub web_socket_debugger_url: Option<String>,
}

impl PageTarget {
    /// Whether this target is a top-level page
    pub fn is_page(&self) -> bool {
        self.target_type == "page"
    }
}

/// Browser identity from `/json/version`
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    /// Product name and version, e.g. "Chrome/124.0.6367.60"
    #[serde(rename = "Browser")]
    pub browser: String,

    /// DevTools protocol version
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,

    /// Full user agent string
    #[serde(rename = "User-Agent", default)]
    pub user_agent: String,
}

/// Client for one browser's remote-debugging endpoint
#[derive(Debug, Clone)]
pub struct BrowserEndpoint {
    base_url: String,
    client: reqwest::Client,
}

impl BrowserEndpoint {
    /// Create a client for the debugging endpoint at `addr`
    pub fn new(addr: SocketAddr) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self {
            base_url: format!("http://{}", addr),
            client,
        }
    }

    /// Fetch the browser identity document
    pub async fn version(&self) -> Result<BrowserVersion> {
        let url = format!("{}/json/version", self.base_url);
        debug!("Fetching browser version from {}", url);

        let version = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<BrowserVersion>()
            .await?;

        trace!("Browser identity: {}", version.browser);
        Ok(version)
    }

    /// Fetch the open targets, filtered to top-level pages
    pub async fn page_targets(&self) -> Result<Vec<PageTarget>> {
        let url = format!("{}/json/list", self.base_url);

        let targets = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<PageTarget>>()
            .await?;

        let pages: Vec<PageTarget> = targets.into_iter().filter(PageTarget::is_page).collect();
        trace!("Discovered {} page targets", pages.len());
        Ok(pages)
    }

    /// The endpoint's base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_target_deserialization() {
        // Shape of a /json/list entry
        let raw = r#"{
            "description": "",
            "devtoolsFrontendUrl": "/devtools/inspector.html?ws=127.0.0.1:9222/devtools/page/ABC123",
            "id": "ABC123",
            "title": "Sign in to your account",
            "type": "page",
            "url": "https://login.microsoftonline.com/common/oauth2/authorize",
            "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/page/ABC123"
        }"#;

        let target: PageTarget = serde_json::from_str(raw).unwrap();
        assert!(target.is_page());
        assert_eq!(target.id, "ABC123");
        assert_eq!(
            target.web_socket_debugger_url.as_deref(),
            Some("ws://127.0.0.1:9222/devtools/page/ABC123")
        );
    }

    #[test]
    fn test_non_page_targets_are_flagged() {
        let raw = r#"{"id": "W1", "type": "service_worker", "url": "https://login.live.com/sw.js"}"#;
        let target: PageTarget = serde_json::from_str(raw).unwrap();
        assert!(!target.is_page());
        assert!(target.web_socket_debugger_url.is_none());
    }

    #[test]
    fn test_endpoint_base_url() {
        let endpoint = BrowserEndpoint::new("127.0.0.1:9222".parse().unwrap());
        assert_eq!(endpoint.base_url(), "http://127.0.0.1:9222");
    }
}
