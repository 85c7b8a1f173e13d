//! Top-level requests against the target site
//!
//! [`SiteClient`] turns one user request into one finished document:
//! - A post permalink becomes a [`PostSummary`] with its ordered comment forest
//! - A subreddit becomes a [`SubredditListing`]
//! - A raw comment fragment address becomes a [`Forest`]

use crate::config::Config;
use crate::crawler::{resolve_link, CrawlEngine, CrawlOptions, FetchMethod, HttpTransport, Transport};
use crate::markup;
use crate::schema::{PageSchema, ShredditSchema};
use crate::thread::{self, Forest, PostHeader, PostSummary, SubredditListing};
use crate::{ConfigError, FetchError, RatError};
use url::Url;

/// Client for post, listing and thread requests
pub struct SiteClient<T, S = ShredditSchema> {
    engine: CrawlEngine<T, S>,
}

impl SiteClient<HttpTransport, ShredditSchema> {
    /// Builds an HTTP-backed client for the configured site
    pub fn from_config(config: &Config) -> Result<Self, RatError> {
        let base_url = Url::parse(&config.site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
        let transport = HttpTransport::new(&config.user_agent, &config.crawler)?;

        Ok(Self::new(
            transport,
            ShredditSchema::new(),
            base_url,
            config.crawler.crawl_options(),
        ))
    }
}

impl<T: Transport, S: PageSchema> SiteClient<T, S> {
    pub fn new(transport: T, schema: S, base_url: Url, options: CrawlOptions) -> Self {
        Self {
            engine: CrawlEngine::new(transport, schema, base_url, options),
        }
    }

    pub fn engine(&self) -> &CrawlEngine<T, S> {
        &self.engine
    }

    /// Loads a post page and its complete comment thread
    ///
    /// # Arguments
    ///
    /// * `permalink` - Absolute or site-relative post URL
    ///
    /// # Returns
    ///
    /// * `Ok(PostSummary)` - The post with its ordered comment forest
    /// * `Err(RatError)` - The page, the post element or the thread failed to load
    pub async fn fetch_post(&self, permalink: &str) -> Result<PostSummary, RatError> {
        let url = resolve_link(self.engine.base_url(), permalink)?;
        tracing::info!("Loading post {}", url);

        let body = self.fetch_page(&url).await?;
        let header = self.read_post(&url, &body)?;

        let comments = self.engine.schema().comments_path(&header);
        let crawl = self.engine.fetch_thread(&comments).await?;
        let forest = thread::assemble(crawl.records);

        for diagnostic in &forest.diagnostics {
            tracing::debug!("{}", diagnostic);
        }
        if !forest.orphans.is_empty() {
            tracing::warn!(
                "{} replies of {} could not be attached to the thread",
                forest.orphans.len(),
                header.id
            );
        }

        Ok(PostSummary::new(header, forest, crawl.diagnostics))
    }

    /// Crawls and assembles a thread from its root comment fragment
    pub async fn fetch_thread(&self, fragment: &str) -> Result<Forest, RatError> {
        let crawl = self.engine.fetch_thread(fragment).await?;
        let mut forest = thread::assemble(crawl.records);

        let mut diagnostics = crawl.diagnostics;
        diagnostics.append(&mut forest.diagnostics);
        forest.diagnostics = diagnostics;

        Ok(forest)
    }

    /// Loads the post entries of a subreddit listing page
    ///
    /// # Arguments
    ///
    /// * `subreddit` - A name (`rust`, `r/rust`), a site-relative path or a full URL
    pub async fn fetch_listing(&self, subreddit: &str) -> Result<SubredditListing, RatError> {
        let url = listing_url(self.engine.base_url(), subreddit)?;
        tracing::info!("Loading listing {}", url);

        let body = self.fetch_page(&url).await?;
        let document = markup::parse_document(&body).map_err(|e| RatError::Root {
            url: url.to_string(),
            source: e.into(),
        })?;

        let entries = self.engine.schema().listing_entries(document.root());
        tracing::debug!("{} listing entries on {}", entries.len(), url);

        Ok(SubredditListing { entries })
    }

    async fn fetch_page(&self, url: &Url) -> Result<Vec<u8>, RatError> {
        self.engine
            .transport()
            .fetch(FetchMethod::Get, url)
            .await
            .map_err(|e| RatError::Root {
                url: url.to_string(),
                source: FetchError::Transport(e),
            })
    }

    fn read_post(&self, url: &Url, body: &[u8]) -> Result<PostHeader, RatError> {
        let document = markup::parse_document(body).map_err(|e| RatError::Root {
            url: url.to_string(),
            source: e.into(),
        })?;

        let schema = self.engine.schema();
        let post = schema
            .post_node(document.root())
            .ok_or_else(|| RatError::PostNotFound {
                url: url.to_string(),
            })?;

        Ok(schema.extract_post(post))
    }
}

/// Resolves a subreddit argument to its listing page URL
///
/// Full URLs and paths starting with `/` are used as given; anything else is
/// taken as a subreddit name, with or without the `r/` prefix.
pub fn listing_url(base: &Url, subreddit: &str) -> Result<Url, RatError> {
    let subreddit = subreddit.trim();

    if subreddit.starts_with('/') || Url::parse(subreddit).is_ok() {
        return Ok(resolve_link(base, subreddit)?);
    }

    let name = subreddit.strip_prefix("r/").unwrap_or(subreddit);
    let name = name.trim_end_matches('/');
    Ok(resolve_link(base, &format!("/r/{}/", name))?)
}
