//! Markup view over parsed HTML fragments
//!
//! Thin capability layer on top of `scraper`: parse raw bytes into a node
//! tree, search it with [`Matcher`] predicates, and read attributes and text.
//! All searches consider the starting node itself and walk its subtree in
//! document order using an explicit stack.

mod matcher;

pub use matcher::Matcher;

use crate::ParseError;
use scraper::{Html, Node};

/// A node in a parsed tree (element, text, comment, ...)
pub type NodeRef<'a> = ego_tree::NodeRef<'a, Node>;

/// An owned, parsed markup tree
pub struct Fragment {
    html: Html,
}

impl Fragment {
    /// The root of the tree; every parsed node is below it
    pub fn root(&self) -> NodeRef<'_> {
        self.html.tree.root()
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment")
            .field("nodes", &self.html.tree.nodes().count())
            .finish()
    }
}

/// Parses a markup fragment (a partial document such as a comment branch)
pub fn parse_fragment(bytes: &[u8]) -> Result<Fragment, ParseError> {
    let source = std::str::from_utf8(bytes)?;
    Ok(Fragment {
        html: Html::parse_fragment(source),
    })
}

/// Parses a complete HTML document
pub fn parse_document(bytes: &[u8]) -> Result<Fragment, ParseError> {
    let source = std::str::from_utf8(bytes)?;
    Ok(Fragment {
        html: Html::parse_document(source),
    })
}

/// Returns the first node in document order that matches
pub fn find_first<'a>(node: NodeRef<'a>, matcher: &Matcher) -> Option<NodeRef<'a>> {
    node.descendants().find(|n| matcher.matches(*n))
}

/// Like [`find_first`], but never descends into a descendant matching `boundary`
///
/// The starting node itself is never treated as a boundary.
pub fn find_first_outside<'a>(
    node: NodeRef<'a>,
    matcher: &Matcher,
    boundary: &Matcher,
) -> Option<NodeRef<'a>> {
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        if current.id() != node.id() && boundary.matches(current) {
            continue;
        }
        if matcher.matches(current) {
            return Some(current);
        }
        stack.extend(current.children().rev());
    }

    None
}

/// Returns all matching nodes, without searching inside a node once it matched
pub fn find_all<'a>(node: NodeRef<'a>, matcher: &Matcher) -> Vec<NodeRef<'a>> {
    let mut found = Vec::new();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        if matcher.matches(current) {
            found.push(current);
        } else {
            stack.extend(current.children().rev());
        }
    }

    found
}

/// Returns all matching nodes, including matches nested inside other matches
pub fn find_all_nested<'a>(node: NodeRef<'a>, matcher: &Matcher) -> Vec<NodeRef<'a>> {
    node.descendants().filter(|n| matcher.matches(*n)).collect()
}

/// Reads an attribute, empty if absent or if the node is not an element
pub fn attr<'a>(node: NodeRef<'a>, key: &str) -> &'a str {
    node.value()
        .as_element()
        .and_then(|element| element.attr(key))
        .unwrap_or("")
}

/// Returns true if the node is an element carrying the attribute
pub fn has_attr(node: NodeRef<'_>, key: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.attr(key).is_some())
}

/// Element name, `None` for non-element nodes
pub fn tag_name<'a>(node: NodeRef<'a>) -> Option<&'a str> {
    node.value().as_element().map(|element| element.name())
}

/// Concatenated text of the node and all its descendants
pub fn text(node: NodeRef<'_>) -> String {
    node.descendants()
        .filter_map(|n| n.value().as_text())
        .map(|t| &**t)
        .collect()
}
