use crate::core::{CrawlResult, NodeId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub body: String,
    #[serde(default)]
    pub links: Vec<NodeId>,
}

impl Page {
    pub fn new(body: impl Into<String>, links: Vec<NodeId>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// Turns a node identifier into its content and outgoing links.
///
/// Implementations are shared across every task of a run and are called
/// concurrently, so they must be `Send + Sync`. A call either yields the
/// whole page or an error; partial results are not modelled.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, id: &str) -> CrawlResult<Page>;
}
