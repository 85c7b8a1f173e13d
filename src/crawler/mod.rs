//! Crawler module for comment fragment fetching
//!
//! This module contains the crawl logic, including:
//! - The [`Transport`] seam and its `reqwest` implementation
//! - Link resolution and the per-crawl visited set
//! - The lazy branch crawl engine

mod engine;
mod fetcher;
mod transport;
mod visited;

pub use engine::{BranchFailurePolicy, CrawlEngine, CrawlOptions, ThreadCrawl};
pub use fetcher::{build_http_client, HttpTransport};
pub use transport::{FetchMethod, Transport};
pub use visited::{resolve_link, VisitedSet};
