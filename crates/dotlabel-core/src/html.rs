//! Reader for HTML-like label strings.
//!
//! The label body (the part between the outer `<` and `>` of an attribute value) must be a
//! well-formed XML fragment: attribute values are quoted and empty elements are self-closed
//! (`<BR/>`). Named HTML entities are accepted. Tags and attributes are kept as written; the
//! layout code compares them case-insensitively.

use crate::entities::{encode_text, xml_safe_entities};
use crate::markup::{Element, MarkupNode};
use crate::{Error, Result};

const FRAGMENT_ROOT: &str = "dotlabel-fragment";

/// Parses an HTML-like label body into a markup forest.
///
/// Text nodes are returned entity-encoded, the same shape an external markup parser hands to the
/// layout engine.
pub fn parse_html_label(src: &str) -> Result<Vec<MarkupNode>> {
    let prepared = xml_safe_entities(src);
    let wrapped = format!("<{FRAGMENT_ROOT}>{prepared}</{FRAGMENT_ROOT}>");
    let doc = roxmltree::Document::parse(&wrapped).map_err(|e| Error::MarkupParse {
        message: e.to_string(),
    })?;

    let root = doc.root_element();
    let nodes = root.children().filter_map(convert_node).collect::<Vec<_>>();
    tracing::trace!(nodes = nodes.len(), "parsed HTML-like label");
    Ok(nodes)
}

fn convert_node(node: roxmltree::Node<'_, '_>) -> Option<MarkupNode> {
    if node.is_text() {
        let text = node.text()?;
        return Some(MarkupNode::text(encode_text(text).into_owned()));
    }
    if !node.is_element() {
        // Comments and processing instructions carry no label content.
        return None;
    }

    let mut el = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        el = el.with_attr(attr.name(), attr.value());
    }
    el.children = node.children().filter_map(convert_node).collect();
    Some(MarkupNode::Element(el))
}
