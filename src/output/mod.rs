use crate::core::{CrawlError, NodeId};
use parking_lot::Mutex;
use std::io::Write;

/// Receives per-node results as they happen. Called concurrently from
/// every crawl task.
pub trait PageSink: Send + Sync {
    fn page_found(&self, id: &str, body: &str);
    fn fetch_failed(&self, id: &str, error: &CrawlError);
}

/// Prints to stdout in the same shape as the classic Go tour crawler.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    lock: Mutex<()>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_line(&self, line: &str) {
        let _guard = self.lock.lock();
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not worth failing the crawl over.
        let _ = writeln!(stdout, "{}", line);
    }
}

impl PageSink for ConsoleSink {
    fn page_found(&self, id: &str, body: &str) {
        self.write_line(&format!("found: {} {:?}", id, body));
    }

    fn fetch_failed(&self, _id: &str, error: &CrawlError) {
        self.write_line(&error.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Found { id: NodeId, body: String },
    Failed { id: NodeId, error: String },
}

#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<SinkEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().clone()
    }

    pub fn found(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Found { id, .. } => Some(id.clone()),
                SinkEvent::Failed { .. } => None,
            })
            .collect();
        ids.sort();
        ids
    }

    pub fn failed(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .events
            .lock()
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Failed { id, .. } => Some(id.clone()),
                SinkEvent::Found { .. } => None,
            })
            .collect();
        ids.sort();
        ids
    }
}

impl PageSink for MemorySink {
    fn page_found(&self, id: &str, body: &str) {
        self.events.lock().push(SinkEvent::Found {
            id: id.to_string(),
            body: body.to_string(),
        });
    }

    fn fetch_failed(&self, id: &str, error: &CrawlError) {
        self.events.lock().push(SinkEvent::Failed {
            id: id.to_string(),
            error: error.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_splits_events() {
        let sink = MemorySink::new();
        sink.page_found("B", "Packages");
        sink.fetch_failed("C", &CrawlError::NotFound("C".to_string()));
        sink.page_found("A", "Root");

        assert_eq!(sink.found(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(sink.failed(), vec!["C".to_string()]);
        assert_eq!(
            sink.events()[1],
            SinkEvent::Failed {
                id: "C".to_string(),
                error: "not found: C".to_string(),
            }
        );
    }
}
