#![forbid(unsafe_code)]

//! Box-tree layout for HTML-like and record labels, plus edge curve reconstruction.
//!
//! Every translator is a pure function of its inputs: malformed markup degrades (ignored nodes,
//! clamped attributes, straight-line curves) instead of failing. Only the string-driven helpers
//! return errors, and only for parse failures.

pub mod attrs;
pub mod curve;
pub mod grid;
pub mod html;
pub mod measure;
pub mod model;
pub mod record;
pub mod style;
pub mod text;
mod util;

use std::sync::Arc;

use dotlabel_core::{LabelConfig, RankDir};

use crate::curve::{CurveGeometry, CurveRequest};
use crate::model::LayoutBox;
use crate::style::{FontCatalog, StaticFontCatalog, StyleContext};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};

pub use curve::{normalize_orthogonal, reconstruct_curve};
pub use html::{ContentKind, classify, layout_html_label};
pub use measure::{measure_box, measure_label};
pub use record::{layout_record_label, split_record_lines};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] dotlabel_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Default bound on nested `<TABLE>` depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Clone)]
pub struct LayoutOptions {
    pub font_catalog: Arc<dyn FontCatalog + Send + Sync>,
    /// Used by [`measure_label`].
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    /// Tables nested deeper than this are replaced by an empty box.
    pub max_depth: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            font_catalog: Arc::new(StaticFontCatalog::default()),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LayoutOptions {
    /// # Panics
    ///
    /// Panics if `max_depth` is zero: a label must be allowed at least its outermost table.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        assert!(max_depth > 0, "max_depth must be at least 1");
        self.max_depth = max_depth;
        self
    }

    pub fn with_font_catalog(mut self, catalog: Arc<dyn FontCatalog + Send + Sync>) -> Self {
        self.font_catalog = catalog;
        self
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }
}

/// Parses and lays out an HTML-like label body (without the outer `<` `>`).
pub fn layout_html_label_str(
    src: &str,
    config: &LabelConfig,
    options: &LayoutOptions,
) -> Result<LayoutBox> {
    let nodes = dotlabel_core::parse_html_label(src)?;
    Ok(layout_html_label(
        &nodes,
        &StyleContext::root(config),
        options,
    ))
}

/// Parses and lays out a record label.
pub fn layout_record_label_str(
    src: &str,
    rankdir: RankDir,
    config: &LabelConfig,
    options: &LayoutOptions,
) -> Result<LayoutBox> {
    let field = dotlabel_core::parse_record_label(src)?;
    Ok(layout_record_label(
        &field,
        rankdir,
        &StyleContext::root(config),
        options,
    ))
}

/// Parses an edge `pos` stream and reconstructs its curve between `start` and `end`.
pub fn reconstruct_curve_str(
    pos: &str,
    start: Option<dotlabel_core::geom::Point>,
    end: Option<dotlabel_core::geom::Point>,
    orthogonal: bool,
) -> Result<Option<CurveGeometry>> {
    let splines = dotlabel_core::parse_spline_list(pos)?;
    Ok(reconstruct_curve(&CurveRequest {
        start,
        end,
        splines: &splines,
        orthogonal,
    }))
}
