use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::signal::{completion_signal, Outcome};
use super::task::{crawl, CrawlContext};
use super::{CrawlConfig, CrawlError, CrawlResult, VisitedSet};
use crate::fetchers::Fetcher;
use crate::output::{ConsoleSink, PageSink};
use crate::stats::{CrawlStats, StatsTracker};

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub root: Outcome,
    pub claimed: usize,
    pub stats: CrawlStats,
}

/// Runs depth-bounded crawls against one fetcher.
///
/// A `Crawler` keeps no per-run state, so independent runs may share it and
/// execute concurrently.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn PageSink>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        info!("Initializing crawler");
        Self {
            fetcher,
            sink: Arc::new(ConsoleSink::new()),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn PageSink>) -> Self {
        self.sink = sink;
        self
    }

    pub async fn run(&self, config: &CrawlConfig) -> CrawlResult<CrawlReport> {
        self.run_with_cancel(config, CancellationToken::new()).await
    }

    /// Like [`Crawler::run`], but every task also stops when `cancel` fires.
    /// A configured timeout only cancels this run, never the caller's token.
    /// Returns only once every spawned task has finished.
    pub async fn run_with_cancel(
        &self,
        config: &CrawlConfig,
        cancel: CancellationToken,
    ) -> CrawlResult<CrawlReport> {
        config.validate()?;

        info!(
            "Starting crawl from {} (max depth {})",
            config.seed, config.max_depth
        );
        if let Some(limit) = config.max_concurrency {
            debug!("Concurrent fetch limit: {}", limit);
        }

        let run_cancel = cancel.child_token();
        let ctx = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            sink: Arc::clone(&self.sink),
            visited: VisitedSet::new(),
            limiter: config.max_concurrency.map(Semaphore::new),
            cancel: run_cancel.clone(),
            tasks: TaskTracker::new(),
            stats: StatsTracker::new(),
        });

        let deadline = config.timeout.map(|timeout| {
            let run_cancel = run_cancel.clone();
            tokio::spawn(async move {
                sleep(timeout).await;
                warn!("Crawl timed out after {:?}, cancelling", timeout);
                run_cancel.cancel();
            })
        });

        let (reporter, mut signal) = completion_signal();
        let root = ctx.tasks.spawn(crawl(
            Arc::clone(&ctx),
            config.seed.clone(),
            config.max_depth,
            reporter,
        ));

        let outcome = signal.next().await;
        if let Some(deadline) = deadline {
            deadline.abort();
        }

        let root_outcome = match outcome {
            Some(outcome) => outcome,
            None => {
                // The root dropped its reporter; surface the panic if there was one.
                root.await?;
                return Err(CrawlError::LostRoot);
            }
        };

        // After a cancellation, descendants may still be unwinding; wait for
        // them so the stats snapshot is final.
        ctx.tasks.close();
        ctx.tasks.wait().await;

        ctx.stats.finish();
        ctx.stats.log_summary();

        Ok(CrawlReport {
            root: root_outcome,
            claimed: ctx.visited.len(),
            stats: ctx.stats.snapshot(),
        })
    }
}
