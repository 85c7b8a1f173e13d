use crate::crawler::{BranchFailurePolicy, CrawlOptions};
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for RAT
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub crawler: CrawlerConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that site-relative links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    pub name: String,

    /// Version of the client
    pub version: String,

    /// Optional URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "RAT".to_string(),
            version: "1.0".to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    ///
    /// Format: `Name/Version` or `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!("{}/{} (+{})", self.name, self.version, contact),
            None => format!("{}/{}", self.name, self.version),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// What to do when a lazy branch cannot be fetched
    #[serde(rename = "branch-failure")]
    pub branch_failure: BranchFailurePolicy,

    /// Timeout for a single request (milliseconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Timeout for establishing a connection (milliseconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,

    /// Upper bound on a whole thread crawl (milliseconds)
    #[serde(rename = "crawl-deadline")]
    pub crawl_deadline: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            branch_failure: BranchFailurePolicy::Abort,
            request_timeout: 30_000,
            connect_timeout: 10_000,
            crawl_deadline: None,
        }
    }
}

impl CrawlerConfig {
    /// Builds the crawl engine options described by this configuration
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            branch_failure: self.branch_failure,
            deadline: self.crawl_deadline.map(Duration::from_millis),
        }
    }
}
