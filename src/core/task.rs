use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use log::{debug, trace, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::signal::{completion_group, Outcome, Reporter};
use super::{CrawlResult, NodeId, VisitedSet};
use crate::fetchers::{Fetcher, Page};
use crate::output::PageSink;
use crate::stats::StatsTracker;

/// Everything the tasks of one run share. Built fresh by the driver for each run.
pub(crate) struct CrawlContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub sink: Arc<dyn PageSink>,
    pub visited: VisitedSet,
    pub limiter: Option<Semaphore>,
    pub cancel: CancellationToken,
    pub tasks: TaskTracker,
    pub stats: StatsTracker,
}

/// Crawls `id` with `depth` edges of budget left and reports exactly one
/// outcome on `reporter`. Children are spawned as independent tokio tasks.
pub(crate) fn crawl(
    ctx: Arc<CrawlContext>,
    id: NodeId,
    depth: usize,
    reporter: Reporter,
) -> BoxFuture<'static, ()> {
    async move {
        let outcome = visit(&ctx, &id, depth).await;
        trace!("Node {} finished with {:?}", id, outcome);
        ctx.stats.record_outcome(outcome);
        reporter.report(outcome);
    }
    .boxed()
}

async fn visit(ctx: &Arc<CrawlContext>, id: &str, depth: usize) -> Outcome {
    if depth == 0 {
        debug!("Skipping {} - depth exhausted", id);
        return Outcome::DepthExhausted;
    }

    if ctx.cancel.is_cancelled() {
        return Outcome::Timeout;
    }

    if !ctx.visited.try_claim(id) {
        debug!("Skipping {} - already claimed", id);
        return Outcome::AlreadyClaimed;
    }

    let page = match fetch(ctx, id).await {
        Some(Ok(page)) => page,
        Some(Err(e)) => {
            warn!("Fetch failed for {}: {}", id, e);
            ctx.sink.fetch_failed(id, &e);
            return Outcome::FetchFailed;
        }
        None => {
            warn!("Fetch of {} abandoned after cancellation", id);
            return Outcome::Timeout;
        }
    };

    ctx.sink.page_found(id, &page.body);
    debug!("Found {} links on {} at depth {}", page.links.len(), id, depth);

    let (reporters, fan_in) = completion_group(page.links.len());
    for (link, reporter) in page.links.into_iter().zip(reporters) {
        ctx.tasks
            .spawn(crawl(Arc::clone(ctx), link, depth - 1, reporter));
    }

    let tally = tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => {
            warn!("Stopped waiting on children of {} after cancellation", id);
            return Outcome::Timeout;
        }
        tally = fan_in.wait_all() => tally,
    };

    if tally.lost > 0 {
        warn!("{} child task(s) of {} ended without reporting", tally.lost, id);
        ctx.stats.record_lost(tally.lost);
    }

    // A timed-out subtree makes this node's result incomplete too.
    if tally.timeout > 0 {
        return Outcome::Timeout;
    }

    Outcome::Visited
}

/// Runs the fetch under the concurrency limit. `None` means the run was
/// cancelled before the fetch completed.
async fn fetch(ctx: &CrawlContext, id: &str) -> Option<CrawlResult<Page>> {
    // Permits cover the fetch only, never the wait on children.
    let _permit = match &ctx.limiter {
        Some(limiter) => tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return None,
            permit = limiter.acquire() => permit.ok(),
        },
        None => None,
    };

    let started = Utc::now();
    let result = tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => return None,
        result = ctx.fetcher.fetch(id) => result,
    };

    ctx.stats
        .record_fetch(result.is_ok(), Utc::now().signed_duration_since(started));
    Some(result)
}
