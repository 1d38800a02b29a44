//! Uniform grid over the canvas for broad-phase collision checks.

use std::collections::HashMap;

use termcloud_core::geometry::Bounds;

/// Buckets placed elements by the grid cells their bounds cover.
///
/// A query returns every element sharing a cell with the queried bounds;
/// callers still run an exact test on the returned candidates. Only cells
/// that hold an element are stored.
#[derive(Debug, Clone)]
pub struct GridIndex {
    area: Bounds,
    cell_size: f32,
    columns: usize,
    rows: usize,
    cells: HashMap<(usize, usize), Vec<usize>>,
    len: usize,
}

impl GridIndex {
    /// Creates an empty index covering `area` with square cells.
    pub fn new(area: Bounds, cell_size: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let columns = ((area.width() / cell_size).ceil() as usize).max(1);
        let rows = ((area.height() / cell_size).ceil() as usize).max(1);
        Self {
            area,
            cell_size,
            columns,
            rows,
            cells: HashMap::new(),
            len: 0,
        }
    }

    /// Registers `id` in every cell overlapped by `bounds`.
    ///
    /// Parts of `bounds` outside the indexed area are clamped to the
    /// border cells.
    pub fn insert(&mut self, id: usize, bounds: Bounds) {
        let (columns, rows) = self.cell_range(bounds);
        for row in rows {
            for column in columns.clone() {
                self.cells.entry((column, row)).or_default().push(id);
            }
        }
        self.len += 1;
    }

    /// Ids of elements that may intersect `bounds`, ascending and unique.
    pub fn candidates(&self, bounds: Bounds) -> Vec<usize> {
        let (columns, rows) = self.cell_range(bounds);
        let mut found = Vec::new();
        for row in rows {
            for column in columns.clone() {
                if let Some(ids) = self.cells.get(&(column, row)) {
                    found.extend_from_slice(ids);
                }
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Number of inserted elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cell_range(
        &self,
        bounds: Bounds,
    ) -> (
        std::ops::RangeInclusive<usize>,
        std::ops::RangeInclusive<usize>,
    ) {
        let column = |x: f32| self.cell_of(x - self.area.min_x(), self.columns);
        let row = |y: f32| self.cell_of(y - self.area.min_y(), self.rows);
        (
            column(bounds.min_x())..=column(bounds.max_x()),
            row(bounds.min_y())..=row(bounds.max_y()),
        )
    }

    fn cell_of(&self, offset: f32, count: usize) -> usize {
        if offset <= 0.0 {
            return 0;
        }
        ((offset / self.cell_size) as usize).min(count - 1)
    }
}
