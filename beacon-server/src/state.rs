//! Shared dashboard state
//!
//! Two snapshot cells connect the refresh loops to their readers: the
//! bucket list (written by the fetcher, read by the renderer) and the
//! rendered page (written by the renderer, read by every request).
//! Writers replace the `Arc` behind the lock wholesale, so a reader
//! either holds the previous snapshot or the new one, never a partially
//! updated structure.

use std::sync::Arc;

use beacon_core::domain::repo::Bucket;
use tokio::sync::RwLock;

/// Placeholder served if a request arrives before the first render pass
/// has published a page. Startup orders the first render before the
/// listener is bound, so this is normally never seen.
const EMPTY_PAGE: &str = "<!DOCTYPE html><html><body><p>warming up</p></body></html>";

/// Snapshot store shared by the refresh loops and the HTTP handlers
#[derive(Debug)]
pub struct Dashboard {
    buckets: RwLock<Arc<Vec<Bucket>>>,
    page: RwLock<Arc<String>>,
}

impl Dashboard {
    /// Creates an empty dashboard
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(Arc::new(Vec::new())),
            page: RwLock::new(Arc::new(EMPTY_PAGE.to_string())),
        }
    }

    /// Current bucket snapshot
    pub async fn buckets(&self) -> Arc<Vec<Bucket>> {
        Arc::clone(&*self.buckets.read().await)
    }

    /// Replaces the bucket snapshot
    pub async fn publish_buckets(&self, buckets: Vec<Bucket>) {
        *self.buckets.write().await = Arc::new(buckets);
    }

    /// Current rendered page
    pub async fn page(&self) -> Arc<String> {
        Arc::clone(&*self.page.read().await)
    }

    /// Replaces the rendered page
    pub async fn publish_page(&self, page: String) {
        *self.page.write().await = Arc::new(page);
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
