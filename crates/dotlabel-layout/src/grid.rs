//! Occupancy bookkeeping for table cell placement.
//!
//! Each row keeps a sorted list of disjoint occupied column ranges, so wide `COLSPAN` values cost
//! one range per row instead of one flag per column. A grid lives for one table layout pass.

use std::ops::Range;

use crate::model::GridPlacement;

#[derive(Debug, Clone, Default)]
pub struct OccupancyGrid {
    rows: Vec<Vec<Range<usize>>>,
    placements: Vec<GridPlacement>,
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows touched by any placement.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.last())
            .map(|r| r.end)
            .max()
            .unwrap_or(0)
    }

    pub fn placements(&self) -> &[GridPlacement] {
        &self.placements
    }

    pub fn is_occupied(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|ranges| ranges.iter().any(|r| r.contains(&column)))
    }

    /// Claims the first `row_span × column_span` region of `row` whose columns are all free in
    /// every spanned row.
    pub fn place(&mut self, row: usize, row_span: usize, column_span: usize) -> GridPlacement {
        let row_span = row_span.max(1);
        let column_span = column_span.max(1);

        let mut column = self.first_free_column(row, 0);
        while !self.region_is_free(row..row + row_span, column..column + column_span) {
            column = self.first_free_column(row, column + 1);
        }

        for r in row..row + row_span {
            self.occupy(r, column..column + column_span);
        }
        let placement = GridPlacement {
            row,
            column,
            row_span,
            column_span,
        };
        self.placements.push(placement);
        placement
    }

    fn first_free_column(&self, row: usize, from: usize) -> usize {
        let mut column = from;
        if let Some(ranges) = self.rows.get(row) {
            for r in ranges {
                if r.contains(&column) {
                    column = r.end;
                }
            }
        }
        column
    }

    fn region_is_free(&self, rows: Range<usize>, columns: Range<usize>) -> bool {
        rows.into_iter().all(|row| {
            self.rows.get(row).is_none_or(|ranges| {
                ranges
                    .iter()
                    .all(|r| r.end <= columns.start || r.start >= columns.end)
            })
        })
    }

    fn occupy(&mut self, row: usize, columns: Range<usize>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let ranges = &mut self.rows[row];
        let at = ranges.partition_point(|r| r.start < columns.start);
        ranges.insert(at, columns);

        // Merge adjacent ranges so `first_free_column` can step over them in one pass.
        let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
        for r in ranges.drain(..) {
            match merged.last_mut() {
                Some(last) if last.end >= r.start => last.end = last.end.max(r.end),
                _ => merged.push(r),
            }
        }
        *ranges = merged;
    }
}
