//! Snapshot acquisition and tab bookkeeping
//!
//! This module is the glue between the evaluation core and a running
//! browser: discovering open page targets over the remote-debugging HTTP
//! endpoint, fetching security snapshots over one-shot DevTools WebSocket
//! sessions, and keeping a verdict cache keyed by target identity.

pub mod cache;
pub mod cdp;
pub mod discovery;
pub mod fetcher;
pub mod monitor;

// Re-export commonly used types
pub use cache::{CachedVerdict, VerdictCache};
pub use cdp::CdpSession;
pub use discovery::{BrowserEndpoint, BrowserVersion, PageTarget};
pub use fetcher::{CdpSnapshotFetcher, SnapshotFetcher};
pub use monitor::Monitor;
