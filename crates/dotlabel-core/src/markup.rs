//! HTML-like label markup tree.
//!
//! The tree is produced either by [`crate::html::parse_html_label`] or by an external parser. Text
//! nodes carry raw markup text: entity references are still encoded and are decoded by the text
//! builder in `dotlabel-layout`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tags with layout or style meaning. Anything else is accepted and treated as a no-op wrapper.
pub mod tags {
    pub const TABLE: &str = "TABLE";
    pub const TR: &str = "TR";
    pub const TD: &str = "TD";
    pub const FONT: &str = "FONT";
    pub const B: &str = "B";
    pub const I: &str = "I";
    pub const U: &str = "U";
    pub const O: &str = "O";
    pub const S: &str = "S";
    pub const SUB: &str = "SUB";
    pub const SUP: &str = "SUP";
    pub const BR: &str = "BR";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MarkupNode {
    Text { text: String },
    Element(Element),
}

impl MarkupNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            Self::Text { .. } => None,
        }
    }

    /// Whitespace-only text is insignificant between structural elements.
    pub fn is_whitespace(&self) -> bool {
        match self {
            Self::Text { text } => text.chars().all(char::is_whitespace),
            Self::Element(_) => false,
        }
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.as_element().is_some_and(|el| el.is_tag(tag))
    }
}

impl From<Element> for MarkupNode {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

/// An element with case-insensitive tag and attribute names.
///
/// Attribute keys are stored lowercased in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = MarkupNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        if let Some(v) = self.attributes.get(name) {
            return Some(v.as_str());
        }
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Children that are not whitespace-only text.
    pub fn significant_children(&self) -> impl Iterator<Item = &MarkupNode> {
        self.children.iter().filter(|c| !c.is_whitespace())
    }

    /// Direct element children with the given tag, in document order.
    pub fn child_elements<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter_map(MarkupNode::as_element)
            .filter(move |el| el.is_tag(tag))
    }
}
