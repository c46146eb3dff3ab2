mod builder;

pub use builder::{LineBox, MAX_TEXT_NESTING, TextBuilder, TextRun, build_lines};

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: dotlabel_core::config::DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasurer {
    /// Measures one line of text. Line breaking is done by the caller.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-agnostic estimate: display columns × font size × `char_width_factor`.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut width = text.width() as f64 * font_size * char_width_factor;
        if style.bold {
            // Bold glyphs run roughly a tenth wider in the core PostScript faces.
            width *= 1.1;
        }
        TextMetrics {
            width,
            height: font_size * line_height_factor,
        }
    }
}
