//! Named node predicates for the shreddit markup

use crate::markup::Matcher;
use regex::Regex;
use std::sync::OnceLock;

/// Attribute holding a lazy branch's address
pub const LAZY_SOURCE_ATTR: &str = "src";

/// Attribute holding a lazy branch's request method
pub const LAZY_METHOD_ATTR: &str = "method";

fn user_link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/user/[\w-]+/").expect("user link pattern is valid"))
}

fn permalink_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/r/\w*/comments/\w*/\w*/").expect("permalink pattern is valid")
    })
}

/// One reply, nested replies are widgets of their own inside it
pub fn reply_widget() -> Matcher {
    Matcher::Tag("shreddit-comment")
}

/// Link to the author's profile whose first child is the name
pub fn author_link() -> Matcher {
    Matcher::Tag("a")
        .and(Matcher::AttrMatches("href", user_link_pattern()))
        .and(Matcher::FirstChildIsText)
}

/// Container of a reply's rendered body
pub fn body_container() -> Matcher {
    Matcher::AttrEndsWith("id", "-post-rtjson-content")
}

/// Text directly inside a paragraph
pub fn body_paragraph_text() -> Matcher {
    Matcher::TextWithin("p")
}

/// Relative-time element carrying the reply's timestamp
pub fn time_ago() -> Matcher {
    Matcher::Tag("faceplate-timeago")
}

/// Placeholder for replies that must be fetched separately
pub fn lazy_branch_pointer() -> Matcher {
    Matcher::HasAttr(LAZY_SOURCE_ATTR).and(Matcher::HasAttr(LAZY_METHOD_ATTR))
}

/// The post element of a post page
pub fn post_node() -> Matcher {
    Matcher::Tag("shreddit-post")
}

/// Paragraph of the post body
pub fn post_body_paragraph() -> Matcher {
    Matcher::Ancestry(&["p", "div", "div", "shreddit-post"])
}

/// One post on a listing page
pub fn listing_entry() -> Matcher {
    Matcher::AttrEquals("data-testid", "post-container")
}

pub fn listing_headline() -> Matcher {
    Matcher::Tag("h3")
}

/// Link to a post's comment page
pub fn listing_permalink() -> Matcher {
    Matcher::Tag("a").and(Matcher::AttrMatches("href", permalink_pattern()))
}
