//! RAT: a reader for lazily loaded discussion threads
//!
//! This crate fetches a post page (or a subreddit listing), follows every
//! lazily loaded reply branch embedded in the comment markup, and assembles
//! the replies into an ordered comment forest ready for rendering.

pub mod config;
pub mod crawler;
pub mod markup;
pub mod output;
pub mod schema;
pub mod site;
pub mod thread;

use thiserror::Error;

/// Main error type for RAT operations
///
/// Every variant aborts the request it occurred in. Recoverable conditions
/// (extraction misses, orphans, duplicate ids, skipped branches) are never
/// errors; they are reported as [`thread::Diagnostic`] values.
#[derive(Debug, Error)]
pub enum RatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load {url}: {source}")]
    Root { url: String, source: FetchError },

    #[error("Failed to load lazy branch {link}: {source}")]
    Branch { link: String, source: FetchError },

    #[error("No post found on page {url}")]
    PostNotFound { url: String },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl RatError {
    /// The link of the failing lazy branch, if this is a branch failure
    pub fn failing_link(&self) -> Option<&str> {
        match self {
            Self::Branch { link, .. } => Some(link),
            _ => None,
        }
    }
}

/// A failure while fetching or parsing a single fragment
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Network-level failures reported by a [`crawler::Transport`]
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Request cancelled for {url}")]
    Cancelled { url: String },
}

/// Markup that could not be turned into a node tree
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Markup is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to resolve '{link}' against {base}: {source}")]
    Resolve {
        base: String,
        link: String,
        source: ::url::ParseError,
    },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for RAT operations
pub type Result<T> = std::result::Result<T, RatError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{BranchFailurePolicy, CrawlEngine, CrawlOptions, HttpTransport, Transport};
pub use site::SiteClient;
pub use thread::{CommentRecord, Diagnostic, Forest, PostSummary, SubredditListing};
