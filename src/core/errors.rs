use thiserror::Error;

use super::NodeId;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("not found: {0}")]
    NotFound(NodeId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Root task ended without reporting an outcome")]
    LostRoot,

    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type CrawlResult<T> = Result<T, CrawlError>;
