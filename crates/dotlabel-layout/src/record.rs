//! Record label layout (`shape=record`).
//!
//! Fields alternate between horizontal and vertical stacking with each level of braces. The
//! outermost level runs across the rank direction's flow: left to right for `LR`/`RL`, top to
//! bottom otherwise.

use dotlabel_core::{RankDir, RecordField};

use crate::LayoutOptions;
use crate::model::{Axis, BoxKind, HAlign, LayoutBox};
use crate::style::StyleContext;

pub fn layout_record_label(
    field: &RecordField,
    rankdir: RankDir,
    style: &StyleContext,
    options: &LayoutOptions,
) -> LayoutBox {
    let axis = if rankdir.is_horizontal() {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let layout = RecordLayout { style, options };
    match field {
        RecordField::Group { fields } => layout.group(fields, axis),
        leaf @ RecordField::Leaf { .. } => LayoutBox::stack(axis, vec![layout.field(leaf, axis)]),
    }
}

struct RecordLayout<'a> {
    style: &'a StyleContext,
    options: &'a LayoutOptions,
}

impl RecordLayout<'_> {
    fn group(&self, fields: &[RecordField], axis: Axis) -> LayoutBox {
        let mut children = Vec::with_capacity(fields.len() * 2);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                children.push(LayoutBox::new(BoxKind::Rule { axis: axis.flip() }));
            }
            children.push(self.field(field, axis));
        }
        LayoutBox::stack(axis, children)
    }

    /// `axis` is the orientation of the container holding `field`.
    fn field(&self, field: &RecordField, axis: Axis) -> LayoutBox {
        match field {
            RecordField::Group { fields } => self.group(fields, axis.flip()),
            RecordField::Leaf { port, text } => {
                let run_style = self.style.run_style(self.options.font_catalog.as_ref());
                let lines = split_record_lines(text)
                    .into_iter()
                    .map(|(text, align)| {
                        let runs = if text.is_empty() {
                            Vec::new()
                        } else {
                            vec![LayoutBox::new(BoxKind::Run { text }).with_style(run_style.clone())]
                        };
                        LayoutBox::new(BoxKind::Line { align }).with_children(runs)
                    })
                    .collect();
                LayoutBox::new(BoxKind::Field { port: port.clone() }).with_children(lines)
            }
        }
    }
}

/// Splits record field text on the `\n`, `\l` and `\r` line codes.
///
/// Each code ends a line and gives it its alignment (center, left, right). Text after the last
/// code forms a final centered line. `\\` is a literal backslash; other escapes are kept as
/// written. A field without any text still yields one empty line.
pub fn split_record_lines(text: &str) -> Vec<(String, HAlign)> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            current.push(ch);
            continue;
        }
        let align = match chars.next() {
            Some('n') => HAlign::Center,
            Some('l') => HAlign::Left,
            Some('r') => HAlign::Right,
            Some('\\') => {
                current.push('\\');
                continue;
            }
            Some(other) => {
                current.push('\\');
                current.push(other);
                continue;
            }
            None => {
                current.push('\\');
                continue;
            }
        };
        lines.push((std::mem::take(&mut current), align));
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push((current, HAlign::Center));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligns(lines: &[(String, HAlign)]) -> Vec<HAlign> {
        lines.iter().map(|(_, a)| *a).collect()
    }

    #[test]
    fn line_codes_set_alignment() {
        let lines = split_record_lines(r"a\lb\rc\nd");
        assert_eq!(
            lines,
            vec![
                ("a".to_string(), HAlign::Left),
                ("b".to_string(), HAlign::Right),
                ("c".to_string(), HAlign::Center),
                ("d".to_string(), HAlign::Center),
            ]
        );
    }

    #[test]
    fn trailing_code_adds_no_empty_line() {
        let lines = split_record_lines(r"Left\lRight\r");
        assert_eq!(aligns(&lines), vec![HAlign::Left, HAlign::Right]);
    }

    #[test]
    fn escaped_backslash_is_literal() {
        let lines = split_record_lines(r"C:\\temp\x");
        assert_eq!(lines, vec![(r"C:\temp\x".to_string(), HAlign::Center)]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(split_record_lines(""), vec![(String::new(), HAlign::Center)]);
    }

    #[test]
    fn groups_alternate_orientation() {
        let field = RecordField::group([
            RecordField::leaf("a"),
            RecordField::group([RecordField::leaf("b"), RecordField::leaf("c")]),
        ]);
        let root = layout_record_label(
            &field,
            RankDir::LeftToRight,
            &StyleContext::default(),
            &LayoutOptions::default(),
        );
        assert_eq!(
            root.kind,
            BoxKind::Stack {
                axis: Axis::Horizontal
            }
        );
        assert_eq!(
            root.children[1].kind,
            BoxKind::Rule {
                axis: Axis::Vertical
            }
        );
        let inner = &root.children[2];
        assert_eq!(
            inner.kind,
            BoxKind::Stack {
                axis: Axis::Vertical
            }
        );
        assert_eq!(
            inner.children[1].kind,
            BoxKind::Rule {
                axis: Axis::Horizontal
            }
        );
        assert_eq!(root.line_texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn ports_are_kept_on_fields() {
        let field = RecordField::Leaf {
            port: Some("p0".to_string()),
            text: "x".to_string(),
        };
        let root = layout_record_label(
            &field,
            RankDir::TopToBottom,
            &StyleContext::default(),
            &LayoutOptions::default(),
        );
        assert_eq!(root.children.len(), 1);
        assert_eq!(
            root.children[0].kind,
            BoxKind::Field {
                port: Some("p0".to_string())
            }
        );
    }
}
