use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use depthcrawl::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "depthcrawl",
    version,
    about = "Crawl a link graph concurrently, visiting every node at most once"
)]
pub struct Cli {
    /// Node to start from
    #[arg(long, default_value = "http://golang.org/")]
    pub seed: String,

    /// Maximum number of edges to follow from the seed
    #[arg(long, default_value_t = 4)]
    pub depth: usize,

    /// Maximum number of fetches in flight at once (unbounded if omitted)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Abandon the crawl after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// JSON file mapping node ids to {"body", "links"}; defaults to the built-in Go tour graph
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::new(self.seed.clone()).with_depth(self.depth);
        if let Some(limit) = self.concurrency {
            config = config.with_concurrency(limit);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config
    }
}
