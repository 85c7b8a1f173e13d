//! The network seam of the crawler

use crate::TransportError;
use async_trait::async_trait;
use std::fmt;
use url::Url;

/// Request method used for a fragment fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchMethod {
    Get,
    Post,
}

impl fmt::Display for FetchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Issues one request and returns the raw response body
///
/// Implementations report non-success statuses as errors. The crawl engine
/// adds deadline and cancellation handling on top, so implementations only
/// need their own per-request timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, method: FetchMethod, url: &Url) -> Result<Vec<u8>, TransportError>;
}
