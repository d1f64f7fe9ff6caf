use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Semaphore;

use super::{CrawlError, CrawlResult, NodeId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    pub seed: NodeId,
    pub max_depth: usize,
    /// Upper bound on simultaneously outstanding fetches. `None` is unbounded.
    pub max_concurrency: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: "http://golang.org/".to_string(),
            max_depth: 4,
            max_concurrency: None,
            timeout: None,
        }
    }
}

impl CrawlConfig {
    pub fn new(seed: impl Into<NodeId>) -> Self {
        Self {
            seed: seed.into(),
            ..Default::default()
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> CrawlResult<()> {
        if self.seed.is_empty() {
            return Err(CrawlError::Config("seed must not be empty".to_string()));
        }
        match self.max_concurrency {
            Some(0) => {
                return Err(CrawlError::Config(
                    "max_concurrency must be at least 1".to_string(),
                ))
            }
            Some(limit) if limit > Semaphore::MAX_PERMITS => {
                return Err(CrawlError::Config(format!(
                    "max_concurrency must not exceed {}",
                    Semaphore::MAX_PERMITS
                )))
            }
            _ => {}
        }
        Ok(())
    }
}
