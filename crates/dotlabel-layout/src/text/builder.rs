//! Styled runs → aligned lines.

use dotlabel_core::entities::{decode_entities, strip_control_chars};
use dotlabel_core::markup::tags;
use dotlabel_core::{Element, MarkupNode};

use crate::model::{BoxKind, HAlign, LayoutBox};
use crate::style::{FontCatalog, StyleContext};

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: StyleContext,
}

/// One output line. `align` is already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    pub runs: Vec<TextRun>,
    pub align: HAlign,
}

impl LineBox {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn into_layout_box(self, catalog: &dyn FontCatalog) -> LayoutBox {
        let runs = self
            .runs
            .into_iter()
            .map(|run| {
                LayoutBox::new(BoxKind::Run { text: run.text }).with_style(run.style.run_style(catalog))
            })
            .collect();
        LayoutBox::new(BoxKind::Line { align: self.align }).with_children(runs)
    }
}

/// Deepest element nesting followed inside one text flow; deeper elements are dropped.
pub const MAX_TEXT_NESTING: usize = 256;

/// Accumulates runs and `<BR/>` breaks into [`LineBox`]es.
///
/// A line's alignment is the one requested by the break that ends it, else the builder default,
/// else center.
#[derive(Debug, Clone, Default)]
pub struct TextBuilder {
    lines: Vec<LineBox>,
    current: Vec<TextRun>,
    default_align: Option<HAlign>,
    depth: usize,
}

impl TextBuilder {
    pub fn new(default_align: Option<HAlign>) -> Self {
        Self {
            default_align,
            ..Default::default()
        }
    }

    pub fn push_text(&mut self, raw: &str, style: &StyleContext) {
        let decoded = decode_entities(raw);
        let text = strip_control_chars(&decoded);
        if text.is_empty() {
            return;
        }
        self.current.push(TextRun {
            text: text.into_owned(),
            style: style.clone(),
        });
    }

    pub fn break_line(&mut self, align: Option<HAlign>) {
        let align = align.or(self.default_align).unwrap_or_default();
        let runs = std::mem::take(&mut self.current);
        self.lines.push(LineBox { runs, align });
    }

    pub fn push_nodes(&mut self, nodes: &[MarkupNode], style: &StyleContext) {
        for node in nodes {
            match node {
                MarkupNode::Text { text } => self.push_text(text, style),
                MarkupNode::Element(el) => self.push_element(el, style),
            }
        }
    }

    fn push_element(&mut self, el: &Element, style: &StyleContext) {
        if el.is_tag(tags::BR) {
            self.break_line(el.attr("align").and_then(HAlign::parse));
            return;
        }
        if el.is_tag(tags::TABLE) || el.is_tag(tags::TR) || el.is_tag(tags::TD) {
            tracing::debug!(tag = %el.tag, "ignoring table structure inside text content");
            return;
        }
        if self.depth >= MAX_TEXT_NESTING {
            tracing::warn!(
                tag = %el.tag,
                max = MAX_TEXT_NESTING,
                "text markup nested too deeply; dropping the element"
            );
            return;
        }
        self.depth += 1;
        self.push_nodes(&el.children, &style.for_element(el));
        self.depth -= 1;
    }

    pub fn finish(mut self) -> Vec<LineBox> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.break_line(None);
        }
        self.lines
    }
}

/// Flattens a text content list into lines.
pub fn build_lines(
    nodes: &[MarkupNode],
    style: &StyleContext,
    default_align: Option<HAlign>,
) -> Vec<LineBox> {
    let mut builder = TextBuilder::new(default_align);
    builder.push_nodes(nodes, style);
    builder.finish()
}
