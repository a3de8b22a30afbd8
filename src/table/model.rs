//! Table model assembly
//!
//! The grammar publishes each recognized cell as raw grid extents (the
//! values it left in the Quadro registers) plus the captured text. The
//! builder collects those and derives the logical table: distinct anchor
//! rows and columns are ranked to produce row/column indices, and a cell's
//! span is the number of anchors its extent covers, which is what gives
//! merged cells their rowspan/colspan.

use fxhash::FxHashMap;

/// One recognized cell in grid coordinates, as published by the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    /// Grid row of the anchor junction
    pub top: isize,
    /// Grid column of the anchor junction
    pub left: isize,
    /// Grid row of the closing border
    pub bottom: isize,
    /// Grid column of the closing border
    pub right: isize,
    /// Captured interior text
    pub text: String,
}

/// Collects raw cells during a walk; builds the logical model afterwards
#[derive(Debug, Default)]
pub struct TableModelBuilder {
    cells: Vec<RawCell>,
}

impl TableModelBuilder {
    pub fn new() -> Self {
        TableModelBuilder { cells: Vec::new() }
    }

    /// Record one cell from register values: anchor position plus extents
    pub fn push_cell(
        &mut self,
        top: isize,
        left: isize,
        row_extent: isize,
        col_extent: isize,
        text: &str,
    ) {
        self.cells.push(RawCell {
            top,
            left,
            bottom: top + row_extent,
            right: left + col_extent,
            text: text.to_string(),
        });
    }

    pub fn raw_cells(&self) -> &[RawCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Derive the logical table from the collected extents
    pub fn build(&self) -> TableModel {
        let mut tops: Vec<isize> = self.cells.iter().map(|c| c.top).collect();
        tops.sort_unstable();
        tops.dedup();
        let mut lefts: Vec<isize> = self.cells.iter().map(|c| c.left).collect();
        lefts.sort_unstable();
        lefts.dedup();

        let row_of: FxHashMap<isize, usize> =
            tops.iter().enumerate().map(|(i, &t)| (t, i)).collect();
        let col_of: FxHashMap<isize, usize> =
            lefts.iter().enumerate().map(|(i, &l)| (l, i)).collect();

        let mut cells: Vec<TableCell> = self
            .cells
            .iter()
            .map(|raw| {
                let row = row_of[&raw.top];
                let col = col_of[&raw.left];
                let rowspan = tops
                    .iter()
                    .filter(|&&t| raw.top <= t && t < raw.bottom)
                    .count()
                    .max(1);
                let colspan = lefts
                    .iter()
                    .filter(|&&l| raw.left <= l && l < raw.right)
                    .count()
                    .max(1);
                TableCell {
                    row,
                    col,
                    rowspan,
                    colspan,
                    text: normalize_text(&raw.text),
                }
            })
            .collect();
        cells.sort_by_key(|c| (c.row, c.col));

        let mut occupancy = FxHashMap::default();
        for (idx, cell) in cells.iter().enumerate() {
            for r in cell.row..cell.row + cell.rowspan {
                for c in cell.col..cell.col + cell.colspan {
                    occupancy.insert((r, c), idx);
                }
            }
        }

        TableModel {
            row_count: tops.len(),
            column_count: lefts.len(),
            cells,
            occupancy,
        }
    }
}

/// Trim captured pixel rows and drop blank interior lines
fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// One logical cell with its span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub row: usize,
    pub col: usize,
    pub rowspan: usize,
    pub colspan: usize,
    pub text: String,
}

impl TableCell {
    /// True if this cell is the one anchored at `(row, col)` rather than
    /// merely covering it
    pub fn is_anchored_at(&self, row: usize, col: usize) -> bool {
        self.row == row && self.col == col
    }
}

/// A row/column-indexed table with merged-cell semantics
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    row_count: usize,
    column_count: usize,
    cells: Vec<TableCell>,
    occupancy: FxHashMap<(usize, usize), usize>,
}

impl TableModel {
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    /// The cell covering `(row, col)`, spans included
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.occupancy.get(&(row, col)).map(|&idx| &self.cells[idx])
    }

    /// Text of the cell covering `(row, col)`
    pub fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).map(|c| c.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two() {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 2, 3, "11");
        builder.push_cell(0, 3, 2, 3, "12");
        builder.push_cell(2, 0, 2, 3, "21");
        builder.push_cell(2, 3, 2, 3, "22");
        let model = builder.build();

        assert_eq!(model.row_count(), 2);
        assert_eq!(model.column_count(), 2);
        assert_eq!(model.cell_text(0, 0), Some("11"));
        assert_eq!(model.cell_text(0, 1), Some("12"));
        assert_eq!(model.cell_text(1, 0), Some("21"));
        assert_eq!(model.cell_text(1, 1), Some("22"));
    }

    #[test]
    fn test_row_spanning_cell() {
        // left cell spans two logical rows
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 4, 3, "a");
        builder.push_cell(0, 3, 2, 3, "b");
        builder.push_cell(2, 3, 2, 3, "c");
        let model = builder.build();

        assert_eq!(model.row_count(), 2);
        assert_eq!(model.column_count(), 2);
        let a = model.cell(0, 0).unwrap();
        assert_eq!(a.rowspan, 2);
        assert_eq!(a.colspan, 1);
        // the spanned slot resolves to the same cell
        assert_eq!(model.cell_text(1, 0), Some("a"));
        assert!(model.cell(1, 0).unwrap().is_anchored_at(0, 0));
        assert_eq!(model.cell_text(1, 1), Some("c"));
    }

    #[test]
    fn test_column_spanning_cell() {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 2, 6, "wide");
        builder.push_cell(2, 0, 2, 3, "x");
        builder.push_cell(2, 3, 2, 3, "y");
        let model = builder.build();

        let wide = model.cell(0, 1).unwrap();
        assert_eq!(wide.colspan, 2);
        assert_eq!(wide.text, "wide");
    }

    #[test]
    fn test_text_normalization() {
        let mut builder = TableModelBuilder::new();
        builder.push_cell(0, 0, 2, 3, "  padded  \n\n second ");
        let model = builder.build();
        assert_eq!(model.cell_text(0, 0), Some("padded\nsecond"));
    }

    #[test]
    fn test_empty_builder() {
        let model = TableModelBuilder::new().build();
        assert!(model.is_empty());
        assert_eq!(model.row_count(), 0);
        assert_eq!(model.cell(0, 0), None);
    }
}
