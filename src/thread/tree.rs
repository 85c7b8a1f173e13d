//! Flat record list to comment forest
//!
//! Records are kept in an insertion-ordered sequence next to an id index, so
//! root and child order always follow the order records were first seen.
//! Assembly runs over explicit index lists; no recursion is involved, however
//! deep the thread is.

use crate::thread::{CommentRecord, Diagnostic};
use std::collections::HashMap;

/// Result of assembling a flat record list
#[derive(Debug, Clone, Default)]
pub struct Forest {
    /// Top-level replies in first-seen order
    pub roots: Vec<CommentRecord>,

    /// Subtrees whose head could not be attached anywhere
    pub orphans: Vec<CommentRecord>,

    pub diagnostics: Vec<Diagnostic>,
}

impl Forest {
    /// Total number of records in the forest and the orphan list
    pub fn record_count(&self) -> usize {
        self.roots
            .iter()
            .chain(self.orphans.iter())
            .map(CommentRecord::subtree_len)
            .sum()
    }
}

/// Builds a forest from a flat record list
///
/// # Rules
///
/// - A duplicate id replaces the earlier record in its first-seen position
/// - Records with `depth == 0` are roots, whatever their `parent_id`
/// - Any other record becomes a child of the record named by `parent_id`
/// - A record whose parent is unknown heads an orphan subtree
/// - Records only reachable through a parent cycle are detached: the first
///   seen member of each cycle heads an orphan subtree
pub fn build_forest(records: Vec<CommentRecord>) -> Forest {
    let mut diagnostics = Vec::new();

    // Insertion-ordered records plus id index
    let mut slots: Vec<Option<CommentRecord>> = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());

    for record in records {
        match index.get(&record.id) {
            Some(&position) => {
                tracing::debug!("Duplicate reply id {}, keeping the later record", record.id);
                diagnostics.push(Diagnostic::DuplicateId {
                    id: record.id.clone(),
                });
                slots[position] = Some(record);
            }
            None => {
                index.insert(record.id.clone(), slots.len());
                slots.push(Some(record));
            }
        }
    }

    let count = slots.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut parent_of: Vec<Option<usize>> = vec![None; count];
    let mut roots = Vec::new();
    let mut orphan_heads = Vec::new();

    for (position, slot) in slots.iter().enumerate() {
        let Some(record) = slot else { continue };

        if record.is_root() {
            roots.push(position);
            continue;
        }

        match index.get(&record.parent_id) {
            Some(&parent) if parent != position => {
                children[parent].push(position);
                parent_of[position] = Some(parent);
            }
            _ => {
                tracing::debug!(
                    "Reply {} has unknown parent '{}'",
                    record.id,
                    record.parent_id
                );
                diagnostics.push(Diagnostic::OrphanRecord {
                    id: record.id.clone(),
                    parent_id: record.parent_id.clone(),
                });
                orphan_heads.push(position);
            }
        }
    }

    // Pre-order over every head; whatever stays unreached hangs off a cycle
    let mut reached = vec![false; count];
    let mut preorder = Vec::with_capacity(count);
    for &head in roots.iter().chain(orphan_heads.iter()) {
        visit(head, &children, &mut reached, &mut preorder);
    }

    for position in 0..count {
        if reached[position] {
            continue;
        }

        // Unreached records have a parent chain that ends in a cycle
        let head = cycle_head(position, &parent_of);
        if let Some(record) = &slots[head] {
            tracing::debug!("Reply {} closes a parent cycle", record.id);
            diagnostics.push(Diagnostic::ParentCycle {
                id: record.id.clone(),
            });
        }
        if let Some(parent) = parent_of[head].take() {
            children[parent].retain(|&child| child != head);
        }
        orphan_heads.push(head);
        visit(head, &children, &mut reached, &mut preorder);
    }

    // Children come after their parent in pre-order, so building in reverse
    // always finds every child subtree already complete
    let mut built: Vec<Option<CommentRecord>> = vec![None; count];
    for &position in preorder.iter().rev() {
        let Some(mut record) = slots[position].take() else {
            continue;
        };
        record.children = children[position]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[position] = Some(record);
    }

    let roots = take_heads(&roots, &mut built);
    let orphans = take_heads(&orphan_heads, &mut built);

    Forest {
        roots,
        orphans,
        diagnostics,
    }
}

fn take_heads(heads: &[usize], built: &mut [Option<CommentRecord>]) -> Vec<CommentRecord> {
    heads
        .iter()
        .filter_map(|&head| built[head].take())
        .collect()
}

/// Follows parent links from `start` to the cycle they end in and returns
/// its first-seen member
fn cycle_head(start: usize, parent_of: &[Option<usize>]) -> usize {
    let mut path = Vec::new();
    let mut on_path: HashMap<usize, usize> = HashMap::new();
    let mut current = start;

    loop {
        if let Some(&entered) = on_path.get(&current) {
            return path[entered..].iter().copied().min().unwrap_or(current);
        }
        on_path.insert(current, path.len());
        path.push(current);

        match parent_of[current] {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

fn visit(head: usize, children: &[Vec<usize>], reached: &mut [bool], preorder: &mut Vec<usize>) {
    let mut stack = vec![head];
    while let Some(position) = stack.pop() {
        if reached[position] {
            continue;
        }
        reached[position] = true;
        preorder.push(position);
        stack.extend(children[position].iter().rev());
    }
}
