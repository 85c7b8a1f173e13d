use crate::thread::{CommentRecord, Diagnostic, Forest};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Post metadata read from the post page, before comments are attached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    pub author: String,
    pub score: i64,
    pub title: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub comment_count: u64,
    /// Full post id, e.g. `t3_abc123`
    pub id: String,
    /// Subreddit name without the `r/` prefix
    pub subreddit: String,
    pub body_lines: Vec<String>,
}

/// A post with its ordered comment forest, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub author: String,
    pub score: i64,
    pub title: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub comment_count: u64,
    pub id: String,
    pub subreddit: String,
    pub body_lines: Vec<String>,
    pub comments: Vec<CommentRecord>,
    pub orphans: Vec<CommentRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PostSummary {
    /// Combines the post header with an assembled forest
    ///
    /// `crawl_diagnostics` go first, followed by the forest's own.
    pub fn new(header: PostHeader, forest: Forest, crawl_diagnostics: Vec<Diagnostic>) -> Self {
        let mut diagnostics = crawl_diagnostics;
        diagnostics.extend(forest.diagnostics);

        Self {
            author: header.author,
            score: header.score,
            title: header.title,
            timestamp: header.timestamp,
            comment_count: header.comment_count,
            id: header.id,
            subreddit: header.subreddit,
            body_lines: header.body_lines,
            comments: forest.roots,
            orphans: forest.orphans,
            diagnostics,
        }
    }
}

/// One entry of a subreddit listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    pub link: String,
}

/// Entries of a listing page in page order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubredditListing {
    pub entries: Vec<ListingEntry>,
}
