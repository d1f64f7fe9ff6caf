mod config;
mod crawler;
mod errors;
mod signal;
mod task;
mod visited;

pub type NodeId = String;

pub use config::CrawlConfig;
pub use crawler::{CrawlReport, Crawler};
pub use errors::{CrawlError, CrawlResult};
pub use signal::{completion_group, completion_signal, FanIn, FanInTally, Outcome, Reporter};
pub use visited::VisitedSet;
