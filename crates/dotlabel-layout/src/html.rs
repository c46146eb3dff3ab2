//! HTML-like label layout.
//!
//! A content list is either text (runs and `<BR/>` breaks) or a table reached through a chain of
//! single-child wrapper elements such as `<FONT>` or `<B>`. Tables are laid out on an
//! [`OccupancyGrid`] so row and column spans never overlap; cell bodies recurse through the same
//! classification, which is how nested tables are handled.

use dotlabel_core::markup::tags;
use dotlabel_core::{Element, MarkupNode};

use crate::LayoutOptions;
use crate::attrs::{parse_dimension, parse_span};
use crate::grid::OccupancyGrid;
use crate::model::{Axis, BoxKind, BoxStyle, GridPlacement, HAlign, LayoutBox, Sides, VAlign};
use crate::style::StyleContext;
use crate::text::build_lines;

pub const DEFAULT_BORDER: f64 = 1.0;
pub const DEFAULT_CELL_PADDING: f64 = 2.0;
pub const DEFAULT_CELL_SPACING: f64 = 2.0;
/// Corner radius used for `STYLE="rounded"`.
pub const ROUNDED_RADIUS: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind<'a> {
    /// `wrappers` lists the elements walked through to reach `table`, outermost first.
    Table {
        wrappers: Vec<&'a Element>,
        table: &'a Element,
    },
    Text,
}

/// Decides whether a content list is a table or text.
///
/// Whitespace-only text is skipped. A single significant element is followed down through its
/// own single significant child until a `<TABLE>` is found or the chain ends.
pub fn classify(content: &[MarkupNode]) -> ContentKind<'_> {
    let mut wrappers = Vec::new();
    let mut next = single_element(content.iter());
    while let Some(el) = next {
        if el.is_tag(tags::TABLE) {
            return ContentKind::Table {
                wrappers,
                table: el,
            };
        }
        wrappers.push(el);
        next = single_element(el.children.iter());
    }
    ContentKind::Text
}

fn single_element<'a>(nodes: impl Iterator<Item = &'a MarkupNode>) -> Option<&'a Element> {
    let mut significant = nodes.filter(|n| !n.is_whitespace());
    let first = significant.next()?;
    if significant.next().is_some() {
        return None;
    }
    first.as_element()
}

/// Lays out an HTML-like label body.
pub fn layout_html_label(
    content: &[MarkupNode],
    style: &StyleContext,
    options: &LayoutOptions,
) -> LayoutBox {
    HtmlLayout { options }.content(content, style, None, 0)
}

struct HtmlLayout<'a> {
    options: &'a LayoutOptions,
}

impl HtmlLayout<'_> {
    /// `depth` counts the tables enclosing `content`.
    fn content(
        &self,
        content: &[MarkupNode],
        style: &StyleContext,
        default_align: Option<HAlign>,
        depth: usize,
    ) -> LayoutBox {
        if content.iter().all(MarkupNode::is_whitespace) {
            return LayoutBox::empty();
        }
        match classify(content) {
            ContentKind::Table { wrappers, table } => {
                let style = wrappers
                    .iter()
                    .fold(style.clone(), |ctx, wrapper| ctx.for_element(wrapper));
                self.table(table, &style, depth + 1)
            }
            ContentKind::Text => {
                let catalog = self.options.font_catalog.as_ref();
                let lines = build_lines(content, style, default_align)
                    .into_iter()
                    .map(|line| line.into_layout_box(catalog))
                    .collect();
                LayoutBox::stack(Axis::Vertical, lines)
            }
        }
    }

    fn table(&self, table: &Element, style: &StyleContext, depth: usize) -> LayoutBox {
        if depth > self.options.max_depth {
            tracing::warn!(
                depth,
                max_depth = self.options.max_depth,
                "table nesting exceeds the depth limit; replacing it with an empty box"
            );
            return LayoutBox::empty();
        }

        let attrs = TableAttrs::read(table, style);
        let mut grid = OccupancyGrid::new();
        let mut rows = Vec::new();

        for node in &table.children {
            let tr = match node {
                MarkupNode::Element(el) if el.is_tag(tags::TR) => el,
                n if n.is_whitespace() => continue,
                n => {
                    tracing::debug!(node = node_name(n), "ignoring non-row content in table");
                    continue;
                }
            };
            let row_index = rows.len();
            let mut cells = Vec::new();
            for node in &tr.children {
                let td = match node {
                    MarkupNode::Element(el) if el.is_tag(tags::TD) => el,
                    n if n.is_whitespace() => continue,
                    n => {
                        tracing::debug!(node = node_name(n), "ignoring non-cell content in row");
                        continue;
                    }
                };
                let placement = grid.place(
                    row_index,
                    parse_span(td.attr("rowspan")),
                    parse_span(td.attr("colspan")),
                );
                cells.push(self.cell(td, placement, &attrs, style, depth));
            }
            rows.push(
                LayoutBox::new(BoxKind::Row { index: row_index }).with_children(cells),
            );
        }

        let kind = BoxKind::Table {
            rows: grid.row_count().max(rows.len()),
            columns: grid.column_count(),
        };
        LayoutBox::new(kind)
            .with_style(attrs.table_style(table))
            .with_children(rows)
    }

    fn cell(
        &self,
        td: &Element,
        placement: GridPlacement,
        table: &TableAttrs,
        style: &StyleContext,
        depth: usize,
    ) -> LayoutBox {
        let balign = td.attr("balign").and_then(HAlign::parse);
        let content = self.content(&td.children, style, balign, depth);

        let halign = td.attr("align").and_then(HAlign::parse);
        let valign = td.attr("valign").and_then(VAlign::parse);
        let nested_table = matches!(classify(&td.children), ContentKind::Table { .. });
        let (halign, valign, fill) = if nested_table && halign.is_none() && valign.is_none() {
            (HAlign::Center, VAlign::Middle, true)
        } else {
            (halign.unwrap_or_default(), valign.unwrap_or_default(), false)
        };

        let cell_style = BoxStyle {
            background: td
                .attr("bgcolor")
                .map(|c| style.qualify_color(c).into_owned())
                .or_else(|| table.background.clone()),
            border_width: Some(
                td.attr("border")
                    .and_then(parse_dimension)
                    .unwrap_or(table.cell_border),
            ),
            border_color: td
                .attr("color")
                .map(|c| style.qualify_color(c).into_owned())
                .or_else(|| table.border_color.clone()),
            border_sides: td.attr("sides").map(Sides::parse),
            padding: Some(
                td.attr("cellpadding")
                    .and_then(parse_dimension)
                    .unwrap_or(table.cell_padding),
            ),
            width: td.attr("width").and_then(parse_dimension),
            height: td.attr("height").and_then(parse_dimension),
            text_align: balign,
            ..Default::default()
        };

        LayoutBox::new(BoxKind::Cell {
            placement,
            halign,
            valign,
            fill,
        })
        .with_style(cell_style)
        .with_children(vec![content])
    }
}

/// Table-level attributes after defaults, shared by every cell of the table.
struct TableAttrs {
    border: f64,
    cell_border: f64,
    cell_padding: f64,
    cell_spacing: f64,
    background: Option<String>,
    border_color: Option<String>,
}

impl TableAttrs {
    fn read(table: &Element, style: &StyleContext) -> Self {
        let border = table
            .attr("border")
            .and_then(parse_dimension)
            .unwrap_or(DEFAULT_BORDER);
        Self {
            border,
            cell_border: table
                .attr("cellborder")
                .and_then(parse_dimension)
                .unwrap_or(border),
            cell_padding: table
                .attr("cellpadding")
                .and_then(parse_dimension)
                .unwrap_or(DEFAULT_CELL_PADDING),
            cell_spacing: table
                .attr("cellspacing")
                .and_then(parse_dimension)
                .unwrap_or(DEFAULT_CELL_SPACING),
            background: table
                .attr("bgcolor")
                .map(|c| style.qualify_color(c).into_owned()),
            border_color: table
                .attr("color")
                .map(|c| style.qualify_color(c).into_owned()),
        }
    }

    fn table_style(&self, table: &Element) -> BoxStyle {
        let rounded = table
            .attr("style")
            .is_some_and(|s| s.split([',', ' ']).any(|v| v.trim().eq_ignore_ascii_case("rounded")));
        BoxStyle {
            background: self.background.clone(),
            border_width: Some(self.border),
            border_color: self.border_color.clone(),
            border_radius: rounded.then_some(ROUNDED_RADIUS),
            border_sides: table.attr("sides").map(Sides::parse),
            spacing: Some(self.cell_spacing),
            width: table.attr("width").and_then(parse_dimension),
            height: table.attr("height").and_then(parse_dimension),
            ..Default::default()
        }
    }
}

fn node_name(node: &MarkupNode) -> &str {
    match node {
        MarkupNode::Element(el) => &el.tag,
        MarkupNode::Text { .. } => "#text",
    }
}
