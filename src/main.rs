mod cli;

use clap::Parser;
use cli::Cli;
use depthcrawl::{ConsoleSink, Crawler, StaticFetcher};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let fetcher = match &cli.graph {
        Some(path) => StaticFetcher::from_path(path)?,
        None => StaticFetcher::golang_fixture(),
    };

    let crawler = Crawler::new(Arc::new(fetcher)).with_sink(Arc::new(ConsoleSink::new()));
    crawler.run(&cli.crawl_config()).await?;

    Ok(())
}
