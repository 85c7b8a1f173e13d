use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// One reply, normalized from a reply widget
///
/// `children` is only ever filled in by the tree builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    /// Unique within one crawl
    pub id: String,

    /// Empty when the widget declares no parent
    pub parent_id: String,

    pub post_id: String,

    /// 0 for a top-level reply
    pub depth: u32,

    pub author: String,

    pub score: i64,

    /// `None` when the widget carried no parseable timestamp
    pub timestamp: Option<DateTime<FixedOffset>>,

    /// Paragraph texts in document order
    pub body_lines: Vec<String>,

    pub children: Vec<CommentRecord>,
}

impl CommentRecord {
    /// Returns true for a top-level reply
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Number of records in this subtree, this one included
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            count += 1;
            stack.extend(record.children.iter());
        }
        count
    }
}
