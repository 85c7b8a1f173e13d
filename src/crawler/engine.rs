//! Lazy branch crawl engine
//!
//! Fetches the root comment fragment, then every lazy branch reachable from
//! it, and returns the flat list of extracted records.
//!
//! # Traversal
//!
//! The engine keeps an explicit worklist instead of recursing. Links found in
//! a fragment are marked visited as they are scheduled and pushed in reverse,
//! so a branch and everything below it is fetched before the next sibling
//! branch. Termination and the at-most-once guarantee depend only on the
//! visited set, so cyclic branch graphs are safe.

use crate::crawler::{resolve_link, FetchMethod, Transport, VisitedSet};
use crate::markup;
use crate::schema::ThreadSchema;
use crate::thread::{CommentRecord, Diagnostic};
use crate::{FetchError, ParseError, RatError, TransportError};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

/// What to do when a lazy branch cannot be loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchFailurePolicy {
    /// Fail the whole crawl, naming the branch
    #[default]
    Abort,

    /// Leave the branch out and keep going
    Skip,
}

/// Options for one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub branch_failure: BranchFailurePolicy,

    /// Upper bound on the whole crawl; expiry fails the pending fetch
    pub deadline: Option<Duration>,
}

/// Output of a successful crawl
#[derive(Debug, Default)]
pub struct ThreadCrawl {
    /// Records in fetch order, then document order within each fragment
    pub records: Vec<CommentRecord>,

    pub diagnostics: Vec<Diagnostic>,

    /// Fragments fetched, the root included
    pub fragments_fetched: usize,
}

/// Records and pointers found in one fragment
struct ScannedFragment {
    records: Vec<CommentRecord>,
    misses: usize,
    links: Vec<String>,
}

/// Drives fetch and extraction over a thread's fragments
pub struct CrawlEngine<T, S> {
    transport: T,
    schema: S,
    base_url: Url,
    options: CrawlOptions,
}

impl<T: Transport, S: ThreadSchema> CrawlEngine<T, S> {
    /// Creates an engine
    ///
    /// # Arguments
    ///
    /// * `transport` - Issues the fragment requests
    /// * `schema` - Extraction rules for the fragments
    /// * `base_url` - Base that site-relative root URLs are resolved against
    /// * `options` - Failure policy and deadline
    pub fn new(transport: T, schema: S, base_url: Url, options: CrawlOptions) -> Self {
        Self {
            transport,
            schema,
            base_url,
            options,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Crawls a thread starting at its root comment fragment
    ///
    /// # Returns
    ///
    /// * `Ok(ThreadCrawl)` - Every record reachable from the root
    /// * `Err(RatError::Root)` - The root fragment failed to load
    /// * `Err(RatError::Branch)` - A branch failed and the policy is `Abort`
    pub async fn fetch_thread(&self, root: &str) -> Result<ThreadCrawl, RatError> {
        self.fetch_thread_until_cancelled(root, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_thread`](Self::fetch_thread), aborting when `cancel` fires
    pub async fn fetch_thread_until_cancelled(
        &self,
        root: &str,
        cancel: &CancellationToken,
    ) -> Result<ThreadCrawl, RatError> {
        let root_url = resolve_link(&self.base_url, root)?;
        let deadline = self.options.deadline.map(|limit| Instant::now() + limit);
        let started = std::time::Instant::now();

        let mut visited = VisitedSet::new();
        visited.insert(&root_url);

        let mut crawl = ThreadCrawl::default();
        let mut worklist: Vec<Url> = Vec::new();

        tracing::debug!("Fetching root fragment {}", root_url);
        let links = self
            .load_fragment(FetchMethod::Get, &root_url, deadline, cancel, &mut crawl)
            .await
            .map_err(|source| RatError::Root {
                url: root_url.to_string(),
                source,
            })?;
        self.schedule(&root_url, links, &mut visited, &mut worklist, &mut crawl);

        let method = self.schema.branch_method();
        while let Some(link) = worklist.pop() {
            tracing::debug!("Fetching lazy branch {} ({} pending)", link, worklist.len());

            match self
                .load_fragment(method, &link, deadline, cancel, &mut crawl)
                .await
            {
                Ok(links) => self.schedule(&link, links, &mut visited, &mut worklist, &mut crawl),
                Err(source) => match self.options.branch_failure {
                    BranchFailurePolicy::Abort => {
                        return Err(RatError::Branch {
                            link: link.to_string(),
                            source,
                        });
                    }
                    BranchFailurePolicy::Skip => {
                        tracing::warn!("Skipping lazy branch {}: {}", link, source);
                        crawl.diagnostics.push(Diagnostic::SkippedBranch {
                            link: link.to_string(),
                            reason: source.to_string(),
                        });
                    }
                },
            }
        }

        tracing::info!(
            "Crawled {} fragments of {} distinct links, {} replies in {:?}",
            crawl.fragments_fetched,
            visited.len(),
            crawl.records.len(),
            started.elapsed()
        );

        Ok(crawl)
    }

    /// Fetches and scans one fragment, returning its raw lazy links
    async fn load_fragment(
        &self,
        method: FetchMethod,
        url: &Url,
        deadline: Option<Instant>,
        cancel: &CancellationToken,
        crawl: &mut ThreadCrawl,
    ) -> Result<Vec<String>, FetchError> {
        let body = self.fetch_bounded(method, url, deadline, cancel).await?;
        crawl.fragments_fetched += 1;

        let scanned = self.scan_fragment(&body)?;
        tracing::debug!(
            "{}: {} replies, {} dropped, {} lazy links",
            url,
            scanned.records.len(),
            scanned.misses,
            scanned.links.len()
        );

        crawl.records.extend(scanned.records);
        for _ in 0..scanned.misses {
            crawl.diagnostics.push(Diagnostic::ExtractionMiss {
                fragment: url.to_string(),
            });
        }

        Ok(scanned.links)
    }

    /// Runs one fetch under the crawl deadline and cancellation token
    async fn fetch_bounded(
        &self,
        method: FetchMethod,
        url: &Url,
        deadline: Option<Instant>,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, TransportError> {
        let fetch = self.transport.fetch(method, url);

        let bounded = async {
            match deadline {
                Some(at) => tokio::time::timeout_at(at, fetch)
                    .await
                    .unwrap_or_else(|_| {
                        Err(TransportError::Timeout {
                            url: url.to_string(),
                        })
                    }),
                None => fetch.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled {
                url: url.to_string(),
            }),
            result = bounded => result,
        }
    }

    /// Parses a fragment and applies the schema to it
    ///
    /// Kept synchronous so the parsed tree never lives across an await.
    fn scan_fragment(&self, body: &[u8]) -> Result<ScannedFragment, ParseError> {
        let fragment = markup::parse_fragment(body)?;
        let root = fragment.root();

        let mut records = Vec::new();
        let mut misses = 0;
        for widget in self.schema.reply_widgets(root) {
            match self.schema.extract_record(widget) {
                Some(record) => records.push(record),
                None => misses += 1,
            }
        }

        Ok(ScannedFragment {
            records,
            misses,
            links: self.schema.lazy_links(root),
        })
    }

    /// Marks unvisited links and pushes them so the first is popped first
    fn schedule(
        &self,
        from: &Url,
        links: Vec<String>,
        visited: &mut VisitedSet,
        worklist: &mut Vec<Url>,
        crawl: &mut ThreadCrawl,
    ) {
        let mut fresh = Vec::new();

        for src in links {
            match resolve_link(from, &src) {
                Ok(url) => {
                    if visited.insert(&url) {
                        fresh.push(url);
                    } else {
                        tracing::trace!("Already visited {}", url);
                    }
                }
                Err(e) => {
                    tracing::warn!("Ignoring unusable lazy link '{}': {}", src, e);
                    crawl.diagnostics.push(Diagnostic::SkippedBranch {
                        link: src,
                        reason: e.to_string(),
                    });
                }
            }
        }

        worklist.extend(fresh.into_iter().rev());
    }
}
