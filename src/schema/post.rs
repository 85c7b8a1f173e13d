//! Post page header extraction

use crate::markup::{self, Matcher, NodeRef};
use crate::schema::extractor::{attr_or_zero, parse_timestamp};
use crate::thread::PostHeader;

/// Reads the post header from a `shreddit-post` element
pub(crate) fn extract_post(post: NodeRef<'_>, paragraph: &Matcher) -> PostHeader {
    let subreddit = markup::attr(post, "subreddit-prefixed-name");

    PostHeader {
        author: markup::attr(post, "author").to_string(),
        score: attr_or_zero(post, "score"),
        title: markup::attr(post, "post-title").to_string(),
        timestamp: parse_timestamp(markup::attr(post, "created-timestamp")),
        comment_count: attr_or_zero(post, "comment-count"),
        id: markup::attr(post, "id").to_string(),
        subreddit: subreddit.strip_prefix("r/").unwrap_or(subreddit).to_string(),
        body_lines: markup::find_all(post, paragraph)
            .into_iter()
            .map(markup::text)
            .collect(),
    }
}

/// Root comment fragment address: `/svc/shreddit/comments/<sub>/<id>`
pub(crate) fn comments_path(header: &PostHeader) -> String {
    let id = header.id.strip_prefix("t3_").unwrap_or(&header.id);
    format!("/svc/shreddit/comments/{}/{}", header.subreddit, id)
}
