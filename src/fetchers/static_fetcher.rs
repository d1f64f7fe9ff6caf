use crate::core::{CrawlError, CrawlResult, NodeId};
use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::{Fetcher, Page};

/// Fetcher backed by a canned graph. Unknown nodes yield `CrawlError::NotFound`.
#[derive(Clone, Default)]
pub struct StaticFetcher {
    pages: Arc<HashMap<NodeId, Page>>,
    default_delay: Option<Duration>,
    delays: Arc<HashMap<NodeId, Duration>>,
    calls: Arc<RwLock<HashMap<NodeId, usize>>>,
}

impl StaticFetcher {
    pub fn new(pages: HashMap<NodeId, Page>) -> Self {
        Self {
            pages: Arc::new(pages),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> CrawlResult<Self> {
        let pages: HashMap<NodeId, Page> = serde_json::from_str(json)?;
        Ok(Self::new(pages))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CrawlResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The graph from the Go tour's web crawler exercise.
    pub fn golang_fixture() -> Self {
        let page = |body: &str, links: &[&str]| {
            Page::new(body, links.iter().map(|l| l.to_string()).collect())
        };

        let pages = HashMap::from([
            (
                "http://golang.org/".to_string(),
                page(
                    "The Go Programming Language",
                    &["http://golang.org/pkg/", "http://golang.org/cmd/"],
                ),
            ),
            (
                "http://golang.org/pkg/".to_string(),
                page(
                    "Packages",
                    &[
                        "http://golang.org/",
                        "http://golang.org/cmd/",
                        "http://golang.org/pkg/fmt/",
                        "http://golang.org/pkg/os/",
                    ],
                ),
            ),
            (
                "http://golang.org/pkg/fmt/".to_string(),
                page(
                    "Package fmt",
                    &["http://golang.org/", "http://golang.org/pkg/"],
                ),
            ),
            (
                "http://golang.org/pkg/os/".to_string(),
                page(
                    "Package os",
                    &["http://golang.org/", "http://golang.org/pkg/"],
                ),
            ),
        ]);

        Self::new(pages)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    pub fn with_node_delay(mut self, id: impl Into<NodeId>, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(id.into(), delay);
        self
    }

    pub fn fetch_count(&self, id: &str) -> usize {
        self.calls.read().get(id).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.calls.read().values().sum()
    }

    /// Every node passed to `fetch` so far, sorted.
    pub fn fetched_nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.calls.read().keys().cloned().collect();
        nodes.sort();
        nodes
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, id: &str) -> CrawlResult<Page> {
        *self.calls.write().entry(id.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delays.get(id).copied().or(self.default_delay) {
            debug!("Delaying fetch of {} by {:?}", id, delay);
            sleep(delay).await;
        }

        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| CrawlError::NotFound(id.to_string()))
    }
}
