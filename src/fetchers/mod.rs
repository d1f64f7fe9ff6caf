pub mod static_fetcher;

mod fetcher;
pub use fetcher::{Fetcher, Page};
pub use static_fetcher::StaticFetcher;

#[cfg(test)]
mod tests;
