use crate::markup::{has_attr, tag_name, NodeRef};
use regex::Regex;

/// A named, composable node predicate
///
/// Matchers are plain values so a schema can build its fixed set once and
/// combine them with [`Matcher::and`].
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Element with the given tag name
    Tag(&'static str),

    /// Element carrying the attribute, whatever its value
    HasAttr(&'static str),

    /// Element whose attribute equals the value
    AttrEquals(&'static str, &'static str),

    /// Element whose attribute ends with the suffix
    AttrEndsWith(&'static str, &'static str),

    /// Element whose attribute matches the pattern somewhere
    AttrMatches(&'static str, &'static Regex),

    /// Node whose first child is a text node
    FirstChildIsText,

    /// Text node whose immediate parent element has the tag name
    TextWithin(&'static str),

    /// Element chain: the node has the first tag, its parent the second, and so on
    Ancestry(&'static [&'static str]),

    /// Every inner matcher must match
    All(Vec<Matcher>),
}

impl Matcher {
    /// Conjunction of two matchers
    pub fn and(self, other: Matcher) -> Matcher {
        match self {
            Matcher::All(mut inner) => {
                inner.push(other);
                Matcher::All(inner)
            }
            first => Matcher::All(vec![first, other]),
        }
    }

    /// Tests a node against this matcher
    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        match self {
            Matcher::Tag(name) => tag_name(node) == Some(*name),
            Matcher::HasAttr(key) => has_attr(node, key),
            Matcher::AttrEquals(key, value) => element_attr(node, key) == Some(*value),
            Matcher::AttrEndsWith(key, suffix) => {
                element_attr(node, key).is_some_and(|v| v.ends_with(suffix))
            }
            Matcher::AttrMatches(key, pattern) => {
                element_attr(node, key).is_some_and(|v| pattern.is_match(v))
            }
            Matcher::FirstChildIsText => node
                .first_child()
                .is_some_and(|child| child.value().is_text()),
            Matcher::TextWithin(name) => {
                node.value().is_text()
                    && node.parent().and_then(tag_name) == Some(*name)
            }
            Matcher::Ancestry(chain) => matches_ancestry(node, chain),
            Matcher::All(inner) => inner.iter().all(|m| m.matches(node)),
        }
    }
}

fn element_attr<'a>(node: NodeRef<'a>, key: &str) -> Option<&'a str> {
    node.value().as_element().and_then(|element| element.attr(key))
}

fn matches_ancestry(node: NodeRef<'_>, chain: &[&str]) -> bool {
    let mut current = Some(node);

    for expected in chain {
        match current {
            Some(n) if tag_name(n) == Some(*expected) => current = n.parent(),
            _ => return false,
        }
    }

    true
}
