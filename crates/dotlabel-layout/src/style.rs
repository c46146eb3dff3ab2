//! Style cascade for label markup.
//!
//! A [`StyleContext`] is an immutable snapshot of the inherited font face, size, color and
//! accumulated toggle styles at one point of the markup tree. Children are derived with
//! [`StyleContext::derive`]; explicit values are merged at construction so reads never walk a
//! parent chain.

use std::borrow::Cow;
use std::sync::Arc;

use dotlabel_core::config::{DEFAULT_FONT_COLOR, DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE};
use dotlabel_core::markup::tags;
use dotlabel_core::{Element, LabelConfig};
use serde::{Deserialize, Serialize};

use crate::attrs::parse_positive;
use crate::model::{BaselineShift, BoxStyle, TextDecorations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Overline,
    Subscript,
    Superscript,
}

impl ToggleStyle {
    pub const ALL: [Self; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strikethrough,
        Self::Overline,
        Self::Subscript,
        Self::Superscript,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        let toggle = match tag.to_ascii_uppercase().as_str() {
            tags::B => Self::Bold,
            tags::I => Self::Italic,
            tags::U => Self::Underline,
            tags::S => Self::Strikethrough,
            tags::O => Self::Overline,
            tags::SUB => Self::Subscript,
            tags::SUP => Self::Superscript,
            _ => return None,
        };
        Some(toggle)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of toggle styles. Only ever grows down the cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToggleStyles(u8);

impl ToggleStyles {
    pub fn contains(self, toggle: ToggleStyle) -> bool {
        self.0 & toggle.bit() != 0
    }

    #[must_use]
    pub fn with(self, toggle: ToggleStyle) -> Self {
        Self(self.0 | toggle.bit())
    }

    pub fn is_superset_of(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ToggleStyle> {
        ToggleStyle::ALL
            .into_iter()
            .filter(move |t| self.contains(*t))
    }
}

impl FromIterator<ToggleStyle> for ToggleStyles {
    fn from_iter<T: IntoIterator<Item = ToggleStyle>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

/// Values one markup element contributes to the cascade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub face: Option<String>,
    pub size: Option<f64>,
    pub color: Option<String>,
    pub toggle: Option<ToggleStyle>,
}

impl StyleOverrides {
    /// Overrides for a style element, or `None` when the tag carries no style meaning.
    pub fn from_element(el: &Element) -> Option<Self> {
        if el.is_tag(tags::FONT) {
            return Some(Self {
                face: el.attr("face").map(str::to_string),
                size: el.attr("point-size").and_then(parse_positive),
                color: el.attr("color").map(str::to_string),
                toggle: None,
            });
        }
        ToggleStyle::from_tag(&el.tag).map(|toggle| Self {
            toggle: Some(toggle),
            ..Default::default()
        })
    }
}

/// Inherited text style at one point of a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleContext {
    face: Option<Arc<str>>,
    size: Option<f64>,
    color: Option<Arc<str>>,
    color_scheme: Option<Arc<str>>,
    toggles: ToggleStyles,
}

impl StyleContext {
    /// Builds a context from an optional parent and the overrides applied on top of it.
    pub fn new(parent: Option<&StyleContext>, overrides: StyleOverrides) -> Self {
        match parent {
            Some(parent) => parent.derive(overrides),
            None => Self::default().derive(overrides),
        }
    }

    /// Seeds a label's root context from its element defaults.
    pub fn root(config: &LabelConfig) -> Self {
        Self {
            face: Some(Arc::from(config.font_name.as_str())),
            size: parse_positive_value(config.font_size),
            color: Some(Arc::from(config.font_color.as_str())),
            color_scheme: config.color_scheme.as_deref().map(Arc::from),
            toggles: ToggleStyles::default(),
        }
    }

    #[must_use]
    pub fn derive(&self, overrides: StyleOverrides) -> Self {
        let StyleOverrides {
            face,
            size,
            color,
            toggle,
        } = overrides;
        Self {
            face: face.map(Arc::from).or_else(|| self.face.clone()),
            size: size.and_then(parse_positive_value).or(self.size),
            color: color.map(Arc::from).or_else(|| self.color.clone()),
            color_scheme: self.color_scheme.clone(),
            toggles: match toggle {
                Some(t) => self.toggles.with(t),
                None => self.toggles,
            },
        }
    }

    /// Context for the children of `el`. Tags without style meaning return an unchanged copy.
    #[must_use]
    pub fn for_element(&self, el: &Element) -> Self {
        match StyleOverrides::from_element(el) {
            Some(overrides) => self.derive(overrides),
            None => self.clone(),
        }
    }

    pub fn face(&self) -> &str {
        self.face.as_deref().unwrap_or(DEFAULT_FONT_NAME)
    }

    pub fn size(&self) -> f64 {
        self.size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_FONT_COLOR)
    }

    pub fn color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }

    pub fn toggles(&self) -> ToggleStyles {
        self.toggles
    }

    pub fn has(&self, toggle: ToggleStyle) -> bool {
        self.toggles.contains(toggle)
    }

    /// Qualifies a color with the context's color scheme when it is a bare color name.
    pub fn qualify_color<'a>(&self, color: &'a str) -> Cow<'a, str> {
        qualify_color(self.color_scheme(), color)
    }

    pub fn font_family(&self, catalog: &dyn FontCatalog) -> FontFamily {
        resolve_font_family(self.face(), catalog)
    }

    /// Style of a text run rendered in this context.
    ///
    /// Weight policy: a bold toggle anywhere up the chain always renders bold; without it no
    /// weight is emitted and the painter's default applies.
    pub fn run_style(&self, catalog: &dyn FontCatalog) -> BoxStyle {
        let baseline_shift = if self.has(ToggleStyle::Superscript) {
            Some(BaselineShift::Super)
        } else if self.has(ToggleStyle::Subscript) {
            Some(BaselineShift::Sub)
        } else {
            None
        };
        BoxStyle {
            font_family: self.font_family(catalog).into_name(),
            font_size: Some(self.size()),
            bold: self.has(ToggleStyle::Bold),
            italic: self.has(ToggleStyle::Italic),
            decorations: TextDecorations {
                underline: self.has(ToggleStyle::Underline),
                overline: self.has(ToggleStyle::Overline),
                line_through: self.has(ToggleStyle::Strikethrough),
            },
            baseline_shift,
            color: Some(self.qualify_color(self.color()).into_owned()),
            ..Default::default()
        }
    }
}

fn parse_positive_value(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

pub(crate) fn qualify_color<'a>(scheme: Option<&str>, color: &'a str) -> Cow<'a, str> {
    let Some(scheme) = scheme.filter(|s| !s.is_empty()) else {
        return Cow::Borrowed(color);
    };
    let bare = !color.is_empty() && color.chars().all(|c| c.is_ascii_alphanumeric());
    if bare {
        Cow::Owned(format!("/{scheme}/{color}"))
    } else {
        Cow::Borrowed(color)
    }
}

/// Result of resolving a ranked font family list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFamily {
    Named(String),
    /// No alternative is installed; the painter's default family applies.
    Unset,
}

impl FontFamily {
    pub fn into_name(self) -> Option<String> {
        match self {
            Self::Named(name) => Some(name),
            Self::Unset => None,
        }
    }
}

/// Answers which font families are installed.
pub trait FontCatalog {
    /// Returns the catalog's spelling of `family` when it is installed.
    fn lookup(&self, family: &str) -> Option<String>;
}

/// A fixed family list, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct StaticFontCatalog {
    families: Vec<String>,
}

impl StaticFontCatalog {
    pub fn new(families: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            families: families.into_iter().map(Into::into).collect(),
        }
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }
}

impl Default for StaticFontCatalog {
    /// PostScript core families plus the usual generic and web-safe names.
    fn default() -> Self {
        Self::new([
            "Times-Roman",
            "Times",
            "Times New Roman",
            "Helvetica",
            "Arial",
            "Courier",
            "Courier New",
            "Symbol",
            "Palatino",
            "Bookman",
            "AvantGarde",
            "NewCenturySchlbk",
            "ZapfChancery",
            "Georgia",
            "Verdana",
            "Trebuchet MS",
            "DejaVu Sans",
            "DejaVu Serif",
            "DejaVu Sans Mono",
            "serif",
            "sans-serif",
            "monospace",
        ])
    }
}

impl FontCatalog for StaticFontCatalog {
    fn lookup(&self, family: &str) -> Option<String> {
        self.families
            .iter()
            .find(|f| f.eq_ignore_ascii_case(family))
            .cloned()
    }
}

/// Walks the comma-separated alternatives in `face` and returns the first installed one.
pub fn resolve_font_family(face: &str, catalog: &dyn FontCatalog) -> FontFamily {
    let candidates = face
        .split(',')
        .map(|c| c.trim().trim_matches(|q| q == '"' || q == '\''))
        .filter(|c| !c.is_empty());
    for candidate in candidates {
        if let Some(name) = catalog.lookup(candidate) {
            return FontFamily::Named(name);
        }
    }
    tracing::info!(face, "no installed font family matches; using the default family");
    FontFamily::Unset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> StyleOverrides {
        StyleOverrides {
            toggle: Some(ToggleStyle::Bold),
            ..Default::default()
        }
    }

    #[test]
    fn unset_fields_fall_back_to_defaults() {
        let ctx = StyleContext::default();
        assert_eq!(ctx.face(), "Times-Roman");
        assert_eq!(ctx.size(), 14.0);
        assert_eq!(ctx.color(), "black");
        assert!(ctx.toggles().is_empty());
    }

    #[test]
    fn explicit_values_override_the_parent() {
        let root = StyleContext::root(&LabelConfig::default().with_font_color("blue"));
        let child = root.derive(StyleOverrides {
            size: Some(20.0),
            ..Default::default()
        });
        assert_eq!(child.size(), 20.0);
        assert_eq!(child.color(), "blue");

        let grandchild = child.derive(StyleOverrides {
            color: Some("red".to_string()),
            ..Default::default()
        });
        assert_eq!(grandchild.size(), 20.0);
        assert_eq!(grandchild.color(), "red");
        assert_eq!(child.color(), "blue");
    }

    #[test]
    fn toggles_accumulate() {
        let ctx = StyleContext::new(None, bold()).derive(StyleOverrides {
            toggle: Some(ToggleStyle::Italic),
            ..Default::default()
        });
        assert!(ctx.has(ToggleStyle::Bold));
        assert!(ctx.has(ToggleStyle::Italic));
        assert_eq!(
            ctx.toggles().iter().collect::<Vec<_>>(),
            vec![ToggleStyle::Bold, ToggleStyle::Italic]
        );
    }

    #[test]
    fn unknown_tags_leave_the_context_unchanged() {
        let ctx = StyleContext::new(None, bold());
        let child = ctx.for_element(&Element::new("BLINK"));
        assert_eq!(child, ctx);
    }

    #[test]
    fn invalid_point_size_inherits() {
        let ctx = StyleContext::default();
        let font = Element::new("FONT").with_attr("POINT-SIZE", "-3");
        assert_eq!(ctx.for_element(&font).size(), 14.0);
        let font = Element::new("FONT").with_attr("POINT-SIZE", "big");
        assert_eq!(ctx.for_element(&font).size(), 14.0);
    }

    #[test]
    fn family_resolution_walks_alternatives() {
        let catalog = StaticFontCatalog::new(["Arial"]);
        assert_eq!(
            resolve_font_family("Missing Sans, arial, serif", &catalog),
            FontFamily::Named("Arial".to_string())
        );
        assert_eq!(
            resolve_font_family("Missing Sans", &catalog),
            FontFamily::Unset
        );
    }

    #[test]
    fn unresolved_family_is_omitted_from_run_style() {
        let ctx = StyleContext::root(&LabelConfig::default().with_font_name("Nope"));
        let style = ctx.run_style(&StaticFontCatalog::default());
        assert_eq!(style.font_family, None);
        assert_eq!(style.font_size, Some(14.0));
    }

    #[test]
    fn color_scheme_qualifies_bare_names() {
        let ctx = StyleContext::root(&LabelConfig::default().with_color_scheme("blues9"));
        assert_eq!(ctx.qualify_color("3"), "/blues9/3");
        assert_eq!(ctx.qualify_color("red"), "/blues9/red");
        assert_eq!(ctx.qualify_color("#ff0000"), "#ff0000");
        assert_eq!(ctx.qualify_color("/x11/red"), "/x11/red");
    }
}
