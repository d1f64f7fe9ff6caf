use super::*;
use crate::core::CrawlError;
use std::time::Duration;

#[tokio::test]
async fn test_fixture_known_page() {
    let fetcher = StaticFetcher::golang_fixture();
    let page = fetcher.fetch("http://golang.org/pkg/").await.unwrap();

    assert_eq!(page.body, "Packages");
    assert_eq!(page.links.len(), 4);
    assert_eq!(fetcher.fetch_count("http://golang.org/pkg/"), 1);
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let fetcher = StaticFetcher::golang_fixture();
    let err = fetcher.fetch("http://golang.org/cmd/").await.unwrap_err();

    assert!(matches!(err, CrawlError::NotFound(ref id) if id == "http://golang.org/cmd/"));
    assert_eq!(err.to_string(), "not found: http://golang.org/cmd/");
    // Failed calls are still counted.
    assert_eq!(fetcher.total_fetches(), 1);
}

#[tokio::test]
async fn test_from_json_defaults_missing_links() {
    let json = r#"{
        "A": { "body": "root", "links": ["B"] },
        "B": { "body": "leaf" }
    }"#;
    let fetcher = StaticFetcher::from_json(json).unwrap();

    assert_eq!(fetcher.fetch("A").await.unwrap().links, vec!["B".to_string()]);
    assert!(fetcher.fetch("B").await.unwrap().links.is_empty());
    assert_eq!(fetcher.fetched_nodes(), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_from_json_rejects_malformed_input() {
    let result = StaticFetcher::from_json("[1, 2, 3]");
    assert!(matches!(result, Err(CrawlError::Json(_))));
}

#[tokio::test(start_paused = true)]
async fn test_node_delay_overrides_default() {
    let fetcher = StaticFetcher::golang_fixture()
        .with_delay(Duration::from_millis(5))
        .with_node_delay("http://golang.org/", Duration::from_secs(60));

    let start = tokio::time::Instant::now();
    fetcher.fetch("http://golang.org/pkg/os/").await.unwrap();
    assert!(start.elapsed() >= Duration::from_millis(5));
    assert!(start.elapsed() < Duration::from_secs(60));

    fetcher.fetch("http://golang.org/").await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(60));
}
