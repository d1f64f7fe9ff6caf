use chrono::{DateTime, Utc};
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::Outcome;

#[derive(Debug, Clone, Serialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub fetch_attempts: usize,
    pub pages_found: usize,
    pub fetch_failures: usize,
    pub outcomes: HashMap<Outcome, usize>,
    pub lost_tasks: usize,
    pub average_fetch_time: f64, // in milliseconds
}

impl CrawlStats {
    pub fn outcome_count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<CrawlStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(CrawlStats {
                start_time: Utc::now(),
                end_time: None,
                fetch_attempts: 0,
                pages_found: 0,
                fetch_failures: 0,
                outcomes: HashMap::new(),
                lost_tasks: 0,
                average_fetch_time: 0.0,
            })),
        }
    }

    pub fn record_fetch(&self, success: bool, duration: chrono::Duration) {
        let mut stats = self.stats.write();
        stats.fetch_attempts += 1;

        if success {
            stats.pages_found += 1;
        } else {
            stats.fetch_failures += 1;
        }

        let current_total = stats.average_fetch_time * (stats.fetch_attempts - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_fetch_time = (current_total + new_duration) / stats.fetch_attempts as f64;
    }

    pub fn record_outcome(&self, outcome: Outcome) {
        *self.stats.write().outcomes.entry(outcome).or_insert(0) += 1;
    }

    pub fn record_lost(&self, count: usize) {
        self.stats.write().lost_tasks += count;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn snapshot(&self) -> CrawlStats {
        self.stats.read().clone()
    }

    pub fn log_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        info!(
            "Crawl finished in {}ms: {} fetches ({} found, {} failed), avg fetch {:.2}ms",
            duration.num_milliseconds(),
            stats.fetch_attempts,
            stats.pages_found,
            stats.fetch_failures,
            stats.average_fetch_time
        );
        for (outcome, count) in &stats.outcomes {
            info!("  {:?}: {}", outcome, count);
        }
        if stats.lost_tasks > 0 {
            info!("  lost tasks: {}", stats.lost_tasks);
        }
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}
