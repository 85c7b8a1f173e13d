use crate::thread::CommentRecord;

/// Sorts every sibling list in the forest by descending score
///
/// The sort is stable, so replies with equal scores keep the order the tree
/// builder gave them, and running it again changes nothing.
pub fn order_forest(roots: &mut [CommentRecord]) {
    let mut pending: Vec<&mut [CommentRecord]> = vec![roots];

    while let Some(siblings) = pending.pop() {
        siblings.sort_by(|a, b| b.score.cmp(&a.score));
        for record in siblings {
            pending.push(&mut record.children[..]);
        }
    }
}
