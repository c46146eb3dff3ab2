//! Intrinsic sizing of a box tree.

use dotlabel_core::geom::{Size, size};

use crate::LayoutOptions;
use crate::model::{Axis, BoxKind, BoxStyle, GridPlacement, LayoutBox};
use crate::text::{TextMeasurer, TextStyle};

/// Thickness of a record field separator.
pub const RULE_THICKNESS: f64 = 1.0;

/// Natural size of `b`: the smallest size that fits its content, padding, borders and explicit
/// minimum `WIDTH`/`HEIGHT`.
pub fn measure_box(b: &LayoutBox, measurer: &dyn TextMeasurer) -> Size {
    match &b.kind {
        BoxKind::Empty => Size::zero(),
        BoxKind::Run { text } => {
            let m = measurer.measure(text, &text_style(&b.style));
            size(m.width, m.height)
        }
        BoxKind::Line { .. } => {
            if b.children.is_empty() {
                let m = measurer.measure("", &TextStyle::default());
                return size(0.0, m.height);
            }
            stack(&b.children, Axis::Horizontal, measurer)
        }
        BoxKind::Stack { axis } => stack(&b.children, *axis, measurer),
        BoxKind::Row { .. } => stack(&b.children, Axis::Horizontal, measurer),
        BoxKind::Field { .. } => stack(&b.children, Axis::Vertical, measurer),
        BoxKind::Rule { axis } => match axis {
            Axis::Vertical => size(RULE_THICKNESS, 0.0),
            Axis::Horizontal => size(0.0, RULE_THICKNESS),
        },
        BoxKind::Cell { .. } => {
            let content = stack(&b.children, Axis::Vertical, measurer);
            let inset = 2.0 * (b.style.padding.unwrap_or(0.0) + b.style.border_width.unwrap_or(0.0));
            with_minimum(size(content.width + inset, content.height + inset), &b.style)
        }
        BoxKind::Table { rows, columns } => table(b, *rows, *columns, measurer),
    }
}

/// [`measure_box`] with the measurer configured on `options`.
pub fn measure_label(b: &LayoutBox, options: &LayoutOptions) -> Size {
    measure_box(b, options.text_measurer.as_ref())
}

fn text_style(style: &BoxStyle) -> TextStyle {
    TextStyle {
        font_family: style.font_family.clone(),
        font_size: style
            .font_size
            .unwrap_or(dotlabel_core::config::DEFAULT_FONT_SIZE),
        bold: style.bold,
        italic: style.italic,
    }
}

fn stack(children: &[LayoutBox], axis: Axis, measurer: &dyn TextMeasurer) -> Size {
    children
        .iter()
        .map(|c| measure_box(c, measurer))
        .fold(Size::zero(), |acc, s| match axis {
            Axis::Horizontal => size(acc.width + s.width, acc.height.max(s.height)),
            Axis::Vertical => size(acc.width.max(s.width), acc.height + s.height),
        })
}

fn with_minimum(s: Size, style: &BoxStyle) -> Size {
    size(
        s.width.max(style.width.unwrap_or(0.0)),
        s.height.max(style.height.unwrap_or(0.0)),
    )
}

fn table(b: &LayoutBox, rows: usize, columns: usize, measurer: &dyn TextMeasurer) -> Size {
    let spacing = b.style.spacing.unwrap_or(0.0);
    let border = b.style.border_width.unwrap_or(0.0);

    let mut cells: Vec<(GridPlacement, Size)> = b
        .children
        .iter()
        .flat_map(|row| row.children.iter())
        .filter_map(|cell| match cell.kind {
            BoxKind::Cell { placement, .. } => Some((placement, measure_box(cell, measurer))),
            _ => None,
        })
        .collect();
    // Narrow spans first so wide spans only pay for what the narrow ones left uncovered.
    cells.sort_by_key(|(p, _)| (p.column_span.max(p.row_span), p.row, p.column));

    let mut widths = vec![0.0_f64; columns];
    let mut heights = vec![0.0_f64; rows];
    for (p, s) in &cells {
        fit_tracks(&mut widths, p.column, p.column_span, s.width, spacing);
        fit_tracks(&mut heights, p.row, p.row_span, s.height, spacing);
    }

    let outer = |tracks: &[f64]| {
        let gaps = spacing * (tracks.len() + 1) as f64;
        tracks.iter().sum::<f64>() + gaps + 2.0 * border
    };
    with_minimum(size(outer(&widths), outer(&heights)), &b.style)
}

/// Grows `tracks[start..start + span]` so together with the gaps between them they cover
/// `needed`. Any deficit is spread evenly.
fn fit_tracks(tracks: &mut [f64], start: usize, span: usize, needed: f64, spacing: f64) {
    let end = (start + span).min(tracks.len());
    if start >= end {
        return;
    }
    let spanned = &mut tracks[start..end];
    let available =
        spanned.iter().sum::<f64>() + spacing * (spanned.len().saturating_sub(1)) as f64;
    let deficit = needed - available;
    if deficit > 0.0 {
        let share = deficit / spanned.len() as f64;
        for t in spanned.iter_mut() {
            *t += share;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextMetrics;

    /// Every character is 10 wide, every line 20 tall.
    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, _style: &TextStyle) -> TextMetrics {
            TextMetrics {
                width: 10.0 * text.chars().count() as f64,
                height: 20.0,
            }
        }
    }

    fn line(text: &str) -> LayoutBox {
        LayoutBox::new(BoxKind::Line {
            align: Default::default(),
        })
        .with_children(vec![LayoutBox::new(BoxKind::Run {
            text: text.to_string(),
        })])
    }

    fn cell(row: usize, column: usize, row_span: usize, column_span: usize, text: &str) -> LayoutBox {
        LayoutBox::new(BoxKind::Cell {
            placement: GridPlacement {
                row,
                column,
                row_span,
                column_span,
            },
            halign: Default::default(),
            valign: Default::default(),
            fill: false,
        })
        .with_children(vec![line(text)])
    }

    #[test]
    fn options_measurer_is_used_for_labels() {
        let b = LayoutBox::stack(Axis::Vertical, vec![line("abc")]);
        let options = LayoutOptions::default().with_text_measurer(std::sync::Arc::new(FixedMeasurer));
        assert_eq!(measure_label(&b, &options), size(30.0, 20.0));

        let default = measure_label(&b, &LayoutOptions::default());
        assert_eq!(default, measure_box(&b, &crate::text::DeterministicTextMeasurer::default()));
        assert_ne!(default, size(30.0, 20.0));
    }

    #[test]
    fn stacks_sum_along_their_axis() {
        let b = LayoutBox::stack(Axis::Vertical, vec![line("ab"), line("abcd")]);
        assert_eq!(measure_box(&b, &FixedMeasurer), size(40.0, 40.0));
        let b = LayoutBox::stack(
            Axis::Horizontal,
            vec![
                line("ab"),
                LayoutBox::new(BoxKind::Rule {
                    axis: Axis::Vertical,
                }),
                line("abcd"),
            ],
        );
        assert_eq!(measure_box(&b, &FixedMeasurer), size(61.0, 20.0));
    }

    #[test]
    fn cells_add_padding_border_and_minimums() {
        let mut c = cell(0, 0, 1, 1, "ab").with_style(BoxStyle {
            padding: Some(2.0),
            border_width: Some(1.0),
            ..Default::default()
        });
        assert_eq!(measure_box(&c, &FixedMeasurer), size(26.0, 26.0));
        c.style.width = Some(100.0);
        assert_eq!(measure_box(&c, &FixedMeasurer), size(100.0, 26.0));
    }

    #[test]
    fn spanning_cells_spread_their_deficit() {
        let table = LayoutBox::new(BoxKind::Table {
            rows: 2,
            columns: 2,
        })
        .with_children(vec![
            LayoutBox::new(BoxKind::Row { index: 0 })
                .with_children(vec![cell(0, 0, 1, 2, "abcdefghij")]),
            LayoutBox::new(BoxKind::Row { index: 1 })
                .with_children(vec![cell(1, 0, 1, 1, "ab"), cell(1, 1, 1, 1, "ab")]),
        ]);
        // Columns start at 20 each; the 100-wide span adds 30 to each.
        assert_eq!(measure_box(&table, &FixedMeasurer), size(100.0, 40.0));

        let spaced = table.with_style(BoxStyle {
            spacing: Some(2.0),
            border_width: Some(1.0),
            ..Default::default()
        });
        // Tracks: columns 49 + 49 (+2 gap = 100), rows 20 + 20; three gaps and two borders each.
        assert_eq!(measure_box(&spaced, &FixedMeasurer), size(106.0, 48.0));
    }
}
