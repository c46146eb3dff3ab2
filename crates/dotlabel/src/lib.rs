#![forbid(unsafe_code)]

//! Headless layout of Graphviz-style labels and edge curves.
//!
//! Re-exports the label models and parsers from `dotlabel-core` and the translators from
//! `dotlabel-layout`, plus one-call helpers that go straight from attribute strings to a box
//! tree or a curve.

pub use dotlabel_core;
pub use dotlabel_layout;

pub use dotlabel_core::geom::{Point, point};
pub use dotlabel_core::{Element, LabelConfig, MarkupNode, RankDir, RecordField, Spline};
pub use dotlabel_layout::LayoutOptions;
pub use dotlabel_layout::curve::CurveGeometry;
pub use dotlabel_layout::model::{BoxKind, BoxStyle, LayoutBox};
pub use dotlabel_layout::style::StyleContext;

/// Every failure surfaces as the parse error that caused it, whichever layer ran the parser.
#[derive(Debug, thiserror::Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Parse(#[from] dotlabel_core::Error),
}

impl From<dotlabel_layout::Error> for HeadlessError {
    fn from(err: dotlabel_layout::Error) -> Self {
        match err {
            dotlabel_layout::Error::Core(e) => Self::Parse(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeadlessError>;

/// Lays out an HTML-like label with default options.
///
/// `src` is the label body without the outer `<` `>` delimiters.
pub fn html_label(src: &str, config: &LabelConfig) -> Result<LayoutBox> {
    Ok(dotlabel_layout::layout_html_label_str(
        src,
        config,
        &LayoutOptions::default(),
    )?)
}

/// Lays out a record label with default options.
pub fn record_label(src: &str, rankdir: RankDir, config: &LabelConfig) -> Result<LayoutBox> {
    Ok(dotlabel_layout::layout_record_label_str(
        src,
        rankdir,
        config,
        &LayoutOptions::default(),
    )?)
}

/// Reconstructs an edge curve from its `pos` attribute and resolved endpoints.
pub fn edge_curve(
    pos: &str,
    start: Point,
    end: Point,
    orthogonal: bool,
) -> Result<Option<CurveGeometry>> {
    Ok(dotlabel_layout::reconstruct_curve_str(
        pos,
        Some(start),
        Some(end),
        orthogonal,
    )?)
}

/// Reads a [`LabelConfig`] from a JSON object such as `{"fontName": "Helvetica"}`.
pub fn label_config(value: &serde_json::Value) -> Result<LabelConfig> {
    Ok(LabelConfig::from_value(value)?)
}
