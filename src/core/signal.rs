use log::trace;
use serde::Serialize;
use tokio::sync::mpsc;

/// Terminal status a crawl task reports to whoever spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    DepthExhausted,
    AlreadyClaimed,
    FetchFailed,
    Visited,
    Timeout,
}

/// Sending half handed to exactly one task. Consumed by `report`, so a task
/// can emit at most one outcome.
#[derive(Debug)]
pub struct Reporter {
    tx: mpsc::Sender<Outcome>,
}

impl Reporter {
    pub fn report(self, outcome: Outcome) {
        // The buffer holds one slot per reporter, so this only fails once the
        // receiving side has been dropped.
        if let Err(e) = self.tx.try_send(outcome) {
            trace!("Outcome {:?} not delivered: {}", outcome, e);
        }
    }
}

/// Receiving half owned by the parent task.
#[derive(Debug)]
pub struct FanIn {
    rx: mpsc::Receiver<Outcome>,
    expected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FanInTally {
    pub depth_exhausted: usize,
    pub already_claimed: usize,
    pub fetch_failed: usize,
    pub visited: usize,
    pub timeout: usize,
    /// Reporters dropped without ever reporting (their task panicked).
    pub lost: usize,
}

impl FanInTally {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::DepthExhausted => self.depth_exhausted += 1,
            Outcome::AlreadyClaimed => self.already_claimed += 1,
            Outcome::FetchFailed => self.fetch_failed += 1,
            Outcome::Visited => self.visited += 1,
            Outcome::Timeout => self.timeout += 1,
        }
    }

    pub fn received(&self) -> usize {
        self.depth_exhausted + self.already_claimed + self.fetch_failed + self.visited + self.timeout
    }
}

/// Builds a signal group for `size` producers: one `Reporter` per child and
/// a single `FanIn` that expects exactly `size` outcomes.
pub fn completion_group(size: usize) -> (Vec<Reporter>, FanIn) {
    let (tx, rx) = mpsc::channel(size.max(1));
    let reporters = (0..size).map(|_| Reporter { tx: tx.clone() }).collect();
    // `tx` drops here so the receiver observes closure once every reporter is gone.
    (reporters, FanIn { rx, expected: size })
}

/// Signal for a single task, as used by the driver for the root.
pub fn completion_signal() -> (Reporter, FanIn) {
    let (tx, rx) = mpsc::channel(1);
    (Reporter { tx }, FanIn { rx, expected: 1 })
}

impl FanIn {
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Next outcome in arrival order, or `None` once every reporter is gone.
    pub async fn next(&mut self) -> Option<Outcome> {
        self.rx.recv().await
    }

    /// Waits until every expected outcome has arrived, in any order.
    pub async fn wait_all(mut self) -> FanInTally {
        let mut tally = FanInTally::default();
        while tally.received() < self.expected {
            match self.rx.recv().await {
                Some(outcome) => tally.record(outcome),
                None => {
                    tally.lost = self.expected - tally.received();
                    break;
                }
            }
        }
        tally
    }
}
