#![forbid(unsafe_code)]

//! Label models and parsers for graph label layout (headless).
//!
//! This crate holds the input side of the pipeline:
//! - HTML-like label markup ([`MarkupNode`]) and a reader for well-formed label strings
//! - record label fields ([`RecordField`]) and the record grammar
//! - edge spline streams ([`Spline`])
//! - per-element label defaults ([`LabelConfig`])
//!
//! Layout lives in `dotlabel-layout`.

pub mod config;
pub mod entities;
pub mod error;
pub mod geom;
pub mod html;
pub mod markup;
pub mod record;
pub mod spline;

pub use config::{LabelConfig, ParseRankDirError, RankDir};
pub use error::{Error, Result};
pub use html::parse_html_label;
pub use markup::{Element, MarkupNode};
pub use record::{RecordField, parse_record_label};
pub use spline::{Spline, parse_spline, parse_spline_list};
