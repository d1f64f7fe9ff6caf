use parking_lot::Mutex;
use std::collections::HashSet;

use super::NodeId;

/// Set of nodes already claimed during one crawl run.
///
/// The only mutation is [`VisitedSet::try_claim`], which performs the
/// presence check and the insert under a single lock acquisition. There is
/// deliberately no `contains` or `remove`: a claimed node stays claimed for
/// the lifetime of the run.
#[derive(Debug, Default)]
pub struct VisitedSet {
    claimed: Mutex<HashSet<NodeId>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the caller won the claim and must fetch `id`.
    pub fn try_claim(&self, id: &str) -> bool {
        let mut claimed = self.claimed.lock();
        if claimed.contains(id) {
            return false;
        }
        claimed.insert(id.to_string())
    }

    pub fn len(&self) -> usize {
        self.claimed.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_first_claim_wins() {
        let visited = VisitedSet::new();
        assert!(visited.try_claim("A"));
        assert!(!visited.try_claim("A"));
        assert!(visited.try_claim("B"));
        assert_eq!(visited.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_racing_claimers_single_winner() {
        let visited = Arc::new(VisitedSet::new());
        let winners = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(tokio::sync::Barrier::new(64));

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let visited = Arc::clone(&visited);
                let winners = Arc::clone(&winners);
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    if visited.try_claim("http://golang.org/cmd/") {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert_eq!(visited.len(), 1);
    }
}
