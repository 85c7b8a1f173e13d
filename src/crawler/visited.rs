//! Link resolution and the per-crawl visited set

use crate::UrlError;
use std::collections::HashSet;
use url::Url;

/// Resolves a link found in a fragment against the URL it was found in
///
/// # Normalization Steps
///
/// 1. Join the link with the base (absolute links replace it)
/// 2. Reject non-HTTP(S) schemes
/// 3. Remove the fragment (everything after #)
///
/// # Examples
///
/// ```
/// use rat::crawler::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://www.reddit.com/svc/shreddit/comments/rust/abc").unwrap();
/// let url = resolve_link(&base, "/svc/shreddit/more-comments/rust/t1_x#top").unwrap();
/// assert_eq!(url.as_str(), "https://www.reddit.com/svc/shreddit/more-comments/rust/t1_x");
/// ```
pub fn resolve_link(base: &Url, link: &str) -> Result<Url, UrlError> {
    let mut url = base.join(link.trim()).map_err(|source| UrlError::Resolve {
        base: base.to_string(),
        link: link.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}

/// URLs already fetched or scheduled during one crawl
///
/// Owned by a single crawl invocation and dropped with it. Membership only
/// ever grows.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the URL as visited; returns false if it already was
    pub fn insert(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    /// Number of distinct URLs seen so far
    pub fn len(&self) -> usize {
        self.urls.len()
    }
}
