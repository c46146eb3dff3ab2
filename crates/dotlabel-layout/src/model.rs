use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::fmt_number_into;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn flip(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Some(Self::Left),
            "CENTER" => Some(Self::Center),
            "RIGHT" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

impl VAlign {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TOP" => Some(Self::Top),
            "MIDDLE" => Some(Self::Middle),
            "BOTTOM" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Where a table cell sits in its table's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPlacement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl GridPlacement {
    pub fn contains(&self, row: usize, column: usize) -> bool {
        (self.row..self.row + self.row_span).contains(&row)
            && (self.column..self.column + self.column_span).contains(&column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoxKind {
    /// Placeholder for empty content.
    Empty,
    /// Children laid out one after another along `axis`.
    Stack { axis: Axis },
    /// One line of text; children are [`BoxKind::Run`] boxes.
    Line { align: HAlign },
    Run { text: String },
    /// A thin separator rule running along `axis`.
    Rule { axis: Axis },
    Table { rows: usize, columns: usize },
    Row { index: usize },
    Cell {
        placement: GridPlacement,
        halign: HAlign,
        valign: VAlign,
        /// Content grows to the cell's full size.
        fill: bool,
    },
    /// A record field; children are its lines.
    Field { port: Option<String> },
}

/// Node of the box tree handed to a painter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    #[serde(flatten)]
    pub kind: BoxKind,
    #[serde(default, skip_serializing_if = "BoxStyle::is_empty")]
    pub style: BoxStyle,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    pub fn new(kind: BoxKind) -> Self {
        Self {
            kind,
            style: BoxStyle::default(),
            children: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(BoxKind::Empty)
    }

    pub fn stack(axis: Axis, children: Vec<LayoutBox>) -> Self {
        Self::new(BoxKind::Stack { axis }).with_children(children)
    }

    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_children(mut self, children: Vec<LayoutBox>) -> Self {
        self.children = children;
        self
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, BoxKind::Empty)
    }

    /// Depth-first, pre-order traversal including `self`.
    pub fn descendants(&self) -> Vec<&LayoutBox> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(b) = stack.pop() {
            out.push(b);
            stack.extend(b.children.iter().rev());
        }
        out
    }

    /// Concatenated run text of every line below this box, one entry per line.
    pub fn line_texts(&self) -> Vec<String> {
        self.descendants()
            .into_iter()
            .filter(|b| matches!(b.kind, BoxKind::Line { .. }))
            .map(|line| {
                line.children
                    .iter()
                    .filter_map(|run| match &run.kind {
                        BoxKind::Run { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect::<String>()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextDecorations {
    pub underline: bool,
    pub overline: bool,
    pub line_through: bool,
}

impl TextDecorations {
    pub fn is_none(&self) -> bool {
        !(self.underline || self.overline || self.line_through)
    }
}

impl fmt::Display for TextDecorations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.underline, "underline"),
            (self.overline, "overline"),
            (self.line_through, "line-through"),
        ];
        let mut first = true;
        for (on, name) in parts {
            if !on {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BaselineShift {
    Sub,
    Super,
}

/// Which table border sides are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl Sides {
    pub const ALL: Self = Self {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };

    /// Reads a `SIDES` value: any combination of `L`, `T`, `R`, `B`.
    pub fn parse(value: &str) -> Self {
        let has = |c: char| value.chars().any(|v| v.eq_ignore_ascii_case(&c));
        Self {
            left: has('L'),
            top: has('T'),
            right: has('R'),
            bottom: has('B'),
        }
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, c) in [
            (self.left, 'L'),
            (self.top, 'T'),
            (self.right, 'R'),
            (self.bottom, 'B'),
        ] {
            if on {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Resolved presentation attributes of one box.
///
/// `Display` renders a `key: value; key: value` description in a fixed key order, so equal
/// styles always produce identical strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub decorations: TextDecorations,
    pub baseline_shift: Option<BaselineShift>,
    pub color: Option<String>,
    pub text_align: Option<HAlign>,
    pub vertical_align: Option<VAlign>,
    pub background: Option<String>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub border_radius: Option<f64>,
    pub border_sides: Option<Sides>,
    pub padding: Option<f64>,
    pub spacing: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl BoxStyle {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BoxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut decls: Vec<(&str, String)> = Vec::new();
        let num = |v: f64| {
            let mut s = String::new();
            fmt_number_into(&mut s, v);
            s
        };

        if let Some(family) = &self.font_family {
            decls.push(("font-family", family.clone()));
        }
        if let Some(size) = self.font_size {
            decls.push(("font-size", num(size)));
        }
        if self.bold {
            decls.push(("font-weight", "bold".to_string()));
        }
        if self.italic {
            decls.push(("font-style", "italic".to_string()));
        }
        if !self.decorations.is_none() {
            decls.push(("text-decoration", self.decorations.to_string()));
        }
        if let Some(shift) = self.baseline_shift {
            let v = match shift {
                BaselineShift::Sub => "sub",
                BaselineShift::Super => "super",
            };
            decls.push(("baseline-shift", v.to_string()));
        }
        if let Some(color) = &self.color {
            decls.push(("color", color.clone()));
        }
        if let Some(align) = self.text_align {
            decls.push(("text-align", align.as_str().to_string()));
        }
        if let Some(align) = self.vertical_align {
            decls.push(("vertical-align", align.as_str().to_string()));
        }
        if let Some(bg) = &self.background {
            decls.push(("background", bg.clone()));
        }
        if let Some(w) = self.border_width {
            decls.push(("border-width", num(w)));
        }
        if let Some(c) = &self.border_color {
            decls.push(("border-color", c.clone()));
        }
        if let Some(r) = self.border_radius {
            decls.push(("border-radius", num(r)));
        }
        if let Some(sides) = self.border_sides {
            decls.push(("border-sides", sides.to_string()));
        }
        if let Some(p) = self.padding {
            decls.push(("padding", num(p)));
        }
        if let Some(s) = self.spacing {
            decls.push(("spacing", num(s)));
        }
        if let Some(w) = self.width {
            decls.push(("width", num(w)));
        }
        if let Some(h) = self.height {
            decls.push(("height", num(h)));
        }

        for (i, (key, value)) in decls.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}
