//! Thread data model and assembly
//!
//! This module contains everything that happens after the crawl:
//! - The normalized [`CommentRecord`] produced by extraction
//! - Turning the flat record list into a parent/child forest
//! - Ordering siblings by descending score
//! - The [`PostSummary`] and [`SubredditListing`] handed to renderers

mod diagnostics;
mod order;
mod record;
mod summary;
mod tree;

pub use diagnostics::Diagnostic;
pub use order::order_forest;
pub use record::CommentRecord;
pub use summary::{ListingEntry, PostHeader, PostSummary, SubredditListing};
pub use tree::{build_forest, Forest};

/// Builds the forest and orders it in one step
pub fn assemble(records: Vec<CommentRecord>) -> Forest {
    let mut forest = build_forest(records);
    order_forest(&mut forest.roots);
    for orphan in &mut forest.orphans {
        order_forest(&mut orphan.children);
    }
    forest
}
