//! Verdict cache
//!
//! An explicit mapping from target id to the most recent verdict, owned by
//! the monitor and shared by `Arc`. Entries live exactly as long as their
//! tab: [`VerdictCache::retain`] evicts whatever the browser no longer
//! lists.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::security::Verdict;

/// A verdict bound to the tab it was produced for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedVerdict {
    /// Target (tab) identifier
    pub target_id: String,

    /// URL the verdict was produced against
    pub url: String,

    /// Correlation id of the inspection run
    pub run_id: Uuid,

    /// The verdict itself
    pub verdict: Verdict,
}

/// Verdict store keyed by target id
#[derive(Debug, Default)]
pub struct VerdictCache {
    entries: RwLock<HashMap<String, CachedVerdict>>,
}

impl VerdictCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a verdict for a target, replacing any previous one
    pub async fn insert(&self, target_id: &str, url: &str, run_id: Uuid, verdict: Verdict) {
        let entry = CachedVerdict {
            target_id: target_id.to_string(),
            url: url.to_string(),
            run_id,
            verdict,
        };

        self.entries
            .write()
            .await
            .insert(target_id.to_string(), entry);
    }

    /// Look up the verdict for a target
    pub async fn get(&self, target_id: &str) -> Option<CachedVerdict> {
        self.entries.read().await.get(target_id).cloned()
    }

    /// All cached verdicts, ordered by target id for stable output
    pub async fn all(&self) -> Vec<CachedVerdict> {
        let mut entries: Vec<CachedVerdict> =
            self.entries.read().await.values().cloned().collect();
        entries.sort_by(|a, b| a.target_id.cmp(&b.target_id));
        entries
    }

    /// Whether a target needs (re)validation
    ///
    /// True when the target has no cached verdict, or when its URL changed
    /// since the cached one was produced (a navigation happened).
    pub async fn needs_validation(&self, target_id: &str, url: &str) -> bool {
        match self.entries.read().await.get(target_id) {
            Some(entry) => entry.url != url,
            None => true,
        }
    }

    /// Evict entries whose target id is not in `live`
    ///
    /// Returns the number of evicted entries.
    pub async fn retain(&self, live: &HashSet<String>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|target_id, _| live.contains(target_id));
        before - entries.len()
    }

    /// Number of cached verdicts
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
