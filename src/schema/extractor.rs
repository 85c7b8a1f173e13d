//! Reply widget to [`CommentRecord`]

use crate::markup::{self, Matcher, NodeRef};
use crate::schema::predicates;
use crate::thread::CommentRecord;
use chrono::{DateTime, FixedOffset};

/// Layout of the `ts` attribute, e.g. `2023-06-20T09:45:12.345000+0000`
const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Extracts normalized records from reply widgets
///
/// Lookups for the author, body and timestamp never descend into nested
/// reply widgets, so a reply missing its own author is dropped rather than
/// credited to one of its children.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    reply_widget: Matcher,
    author_link: Matcher,
    body_container: Matcher,
    body_text: Matcher,
    time_ago: Matcher,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self {
            reply_widget: predicates::reply_widget(),
            author_link: predicates::author_link(),
            body_container: predicates::body_container(),
            body_text: predicates::body_paragraph_text(),
            time_ago: predicates::time_ago(),
        }
    }

    /// The predicate identifying reply widgets
    pub fn reply_widget(&self) -> &Matcher {
        &self.reply_widget
    }

    /// Extracts a record from one reply widget
    ///
    /// Returns `None` when the widget has no author link (deleted, collapsed
    /// or malformed replies). Bad numeric attributes become 0 and a bad
    /// timestamp becomes `None`; neither rejects the record.
    pub fn extract(&self, widget: NodeRef<'_>) -> Option<CommentRecord> {
        let author = self.find_own(widget, &self.author_link)?;
        let name = author.first_child().filter(|child| child.value().is_text())?;

        let timestamp = self
            .find_own(widget, &self.time_ago)
            .and_then(|node| parse_timestamp(markup::attr(node, "ts")));

        let body_lines = self
            .find_own(widget, &self.body_container)
            .map(|body| {
                markup::find_all(body, &self.body_text)
                    .into_iter()
                    .map(markup::text)
                    .collect()
            })
            .unwrap_or_default();

        Some(CommentRecord {
            id: markup::attr(widget, "thingid").to_string(),
            parent_id: markup::attr(widget, "parentid").to_string(),
            post_id: markup::attr(widget, "postid").to_string(),
            depth: attr_or_zero(widget, "depth"),
            author: markup::text(name),
            score: attr_or_zero(widget, "score"),
            timestamp,
            body_lines,
            children: Vec::new(),
        })
    }

    fn find_own<'a>(&self, widget: NodeRef<'a>, matcher: &Matcher) -> Option<NodeRef<'a>> {
        markup::find_first_outside(widget, matcher, &self.reply_widget)
    }
}

/// Parses an integer attribute, 0 when absent or malformed
pub(crate) fn attr_or_zero<T>(node: NodeRef<'_>, key: &str) -> T
where
    T: std::str::FromStr + Default,
{
    markup::attr(node, key).trim().parse().unwrap_or_default()
}

/// Parses a site timestamp, `None` when absent or malformed
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DateTime::parse_from_str(value, TIMESTAMP_LAYOUT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}
