//! Plain text rendering
//!
//! Replies are indented two spaces per nesting level under their parent.

use crate::thread::{CommentRecord, Forest, PostSummary, SubredditListing};
use chrono::{DateTime, FixedOffset};

const INDENT: &str = "  ";

/// Formats a post and its comment forest
pub fn format_post_text(post: &PostSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", post.title));
    out.push_str(&format!(
        "r/{} · {} points · u/{} · {}\n",
        post.subreddit,
        post.score,
        post.author,
        format_timestamp(post.timestamp.as_ref())
    ));
    out.push('\n');

    for line in &post.body_lines {
        out.push_str(line);
        out.push_str("\n\n");
    }

    out.push_str(&format!("--- {} comments ---\n\n", post.comment_count));
    push_records(&mut out, &post.comments);

    if !post.orphans.is_empty() {
        out.push_str(&format!("--- {} detached replies ---\n\n", post.orphans.len()));
        push_records(&mut out, &post.orphans);
    }

    out
}

/// Formats a bare comment forest
pub fn format_forest_text(forest: &Forest) -> String {
    let mut out = String::new();
    push_records(&mut out, &forest.roots);

    if !forest.orphans.is_empty() {
        out.push_str(&format!("--- {} detached replies ---\n\n", forest.orphans.len()));
        push_records(&mut out, &forest.orphans);
    }

    out
}

/// Formats a listing, one numbered entry per line
pub fn format_listing_text(listing: &SubredditListing) -> String {
    let mut out = String::new();

    for (i, entry) in listing.entries.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n     {}\n", i + 1, entry.title, entry.link));
    }

    out
}

fn push_records(out: &mut String, records: &[CommentRecord]) {
    let mut stack: Vec<(&CommentRecord, usize)> = records.iter().rev().map(|r| (r, 0)).collect();

    while let Some((record, level)) = stack.pop() {
        let pad = INDENT.repeat(level);

        out.push_str(&format!(
            "{}[{}] {} · {}\n",
            pad,
            record.score,
            record.author,
            format_timestamp(record.timestamp.as_ref())
        ));
        for line in &record.body_lines {
            out.push_str(&pad);
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');

        stack.extend(record.children.iter().rev().map(|child| (child, level + 1)));
    }
}

fn format_timestamp(timestamp: Option<&DateTime<FixedOffset>>) -> String {
    match timestamp {
        Some(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        None => "unknown time".to_string(),
    }
}
