//! Subreddit listing extraction

use crate::markup::{self, Matcher, NodeRef};
use crate::thread::ListingEntry;

/// Scans a listing page for post entries
///
/// Entries without a permalink are skipped; a missing headline leaves the
/// title empty.
pub(crate) fn extract_entries(
    root: NodeRef<'_>,
    entry: &Matcher,
    headline: &Matcher,
    permalink: &Matcher,
) -> Vec<ListingEntry> {
    let mut entries = Vec::new();

    for container in markup::find_all(root, entry) {
        let Some(link) = markup::find_first(container, permalink) else {
            tracing::debug!("Skipping listing entry without permalink");
            continue;
        };

        let title = markup::find_first(container, headline)
            .map(markup::text)
            .unwrap_or_default();

        entries.push(ListingEntry {
            title: title.trim().to_string(),
            link: markup::attr(link, "href").to_string(),
        });
    }

    entries
}
