//! Site-specific extraction rules
//!
//! Everything that knows what the target site's markup looks like lives
//! here, behind two narrow traits:
//!
//! - [`ThreadSchema`]: what the crawl engine needs from a comment fragment
//!   (reply widgets, records, lazy branch pointers)
//! - [`PageSchema`]: what the site client needs from full pages (the post
//!   header, the comment fragment address, listing entries)
//!
//! [`ShredditSchema`] implements both for the current reddit markup. Swapping
//! in another implementation never touches crawl or assembly code.

mod extractor;
mod listing;
mod post;
pub mod predicates;

pub use extractor::RecordExtractor;

use crate::crawler::FetchMethod;
use crate::markup::{self, Matcher, NodeRef};
use crate::thread::{CommentRecord, ListingEntry, PostHeader};

/// Extraction rules for comment fragments
pub trait ThreadSchema: Send + Sync {
    /// Every reply widget below `root`, nested replies included, in document order
    fn reply_widgets<'a>(&self, root: NodeRef<'a>) -> Vec<NodeRef<'a>>;

    /// Normalizes one reply widget; `None` if it is not a usable reply
    fn extract_record(&self, widget: NodeRef<'_>) -> Option<CommentRecord>;

    /// Raw targets of every lazy branch pointer below `root`, in document order
    fn lazy_links(&self, root: NodeRef<'_>) -> Vec<String>;

    /// Method used to fetch a lazy branch
    fn branch_method(&self) -> FetchMethod {
        FetchMethod::Post
    }
}

/// Extraction rules for post and listing pages
pub trait PageSchema: ThreadSchema {
    /// The post element of a post page
    fn post_node<'a>(&self, root: NodeRef<'a>) -> Option<NodeRef<'a>>;

    /// Post metadata and body from the post element
    fn extract_post(&self, post: NodeRef<'_>) -> PostHeader;

    /// Site-relative address of the root comment fragment for a post
    fn comments_path(&self, header: &PostHeader) -> String;

    /// Listing entries of a subreddit page, in page order
    fn listing_entries(&self, root: NodeRef<'_>) -> Vec<ListingEntry>;
}

/// Rules for reddit's `shreddit` web-component markup
#[derive(Debug, Clone)]
pub struct ShredditSchema {
    extractor: RecordExtractor,
    lazy_pointer: Matcher,
    post: Matcher,
    post_paragraph: Matcher,
    listing_entry: Matcher,
    listing_headline: Matcher,
    listing_permalink: Matcher,
}

impl Default for ShredditSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl ShredditSchema {
    pub fn new() -> Self {
        Self {
            extractor: RecordExtractor::new(),
            lazy_pointer: predicates::lazy_branch_pointer(),
            post: predicates::post_node(),
            post_paragraph: predicates::post_body_paragraph(),
            listing_entry: predicates::listing_entry(),
            listing_headline: predicates::listing_headline(),
            listing_permalink: predicates::listing_permalink(),
        }
    }
}

impl ThreadSchema for ShredditSchema {
    fn reply_widgets<'a>(&self, root: NodeRef<'a>) -> Vec<NodeRef<'a>> {
        markup::find_all_nested(root, self.extractor.reply_widget())
    }

    fn extract_record(&self, widget: NodeRef<'_>) -> Option<CommentRecord> {
        self.extractor.extract(widget)
    }

    fn lazy_links(&self, root: NodeRef<'_>) -> Vec<String> {
        markup::find_all_nested(root, &self.lazy_pointer)
            .into_iter()
            .map(|node| markup::attr(node, predicates::LAZY_SOURCE_ATTR).to_string())
            .filter(|src| !src.is_empty())
            .collect()
    }
}

impl PageSchema for ShredditSchema {
    fn post_node<'a>(&self, root: NodeRef<'a>) -> Option<NodeRef<'a>> {
        markup::find_first(root, &self.post)
    }

    fn extract_post(&self, post: NodeRef<'_>) -> PostHeader {
        post::extract_post(post, &self.post_paragraph)
    }

    fn comments_path(&self, header: &PostHeader) -> String {
        post::comments_path(header)
    }

    fn listing_entries(&self, root: NodeRef<'_>) -> Vec<ListingEntry> {
        listing::extract_entries(
            root,
            &self.listing_entry,
            &self.listing_headline,
            &self.listing_permalink,
        )
    }
}
