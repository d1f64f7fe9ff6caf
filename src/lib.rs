pub mod core;
pub mod fetchers;
pub mod output;
pub mod stats;

pub use core::Crawler;
pub use core::{CrawlConfig, CrawlError, CrawlReport, CrawlResult, NodeId, Outcome, VisitedSet};
pub use fetchers::{Fetcher, Page, StaticFetcher};
pub use output::{ConsoleSink, MemorySink, PageSink};
pub use stats::StatsTracker;
