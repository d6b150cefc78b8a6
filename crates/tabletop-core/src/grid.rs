//! Resizable two-dimensional cell storage.
//!
//! [`Grid`] maps `(column, row)` to an optional occupant plus a per-cell
//! [`Alignment`], and keeps one preferred width per column and one preferred
//! height per row. Cells live in a flat column-major buffer; every structural
//! change reallocates the buffer and copies surviving cells to their new index.

use std::fmt;

use thiserror::Error;

use crate::alignment::Alignment;

/// Sentinel column width meaning "derive from content".
pub const COLUMN_WIDTH_AUTO: f64 = -1.0;
/// Sentinel row height meaning "derive from content".
pub const ROW_HEIGHT_AUTO: f64 = -1.0;

/// Grid validation errors. A failing call never modifies the grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Column index {index} out of grid range ({columns})")]
    ColumnOutOfRange { index: usize, columns: usize },
    #[error("Row index {index} out of grid range ({rows})")]
    RowOutOfRange { index: usize, rows: usize },
    #[error("Insertion index {index} out of range 0..={len}")]
    InsertionOutOfRange { index: usize, len: usize },
    #[error("Size {0} must be non-negative or the AUTO sentinel")]
    InvalidSize(f64),
    #[error("Expected {expected} sizes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

fn is_valid_size(value: f64) -> bool {
    value >= 0.0 || value == COLUMN_WIDTH_AUTO
}

fn check_size(value: f64) -> GridResult<()> {
    if is_valid_size(value) {
        Ok(())
    } else {
        Err(GridError::InvalidSize(value))
    }
}

/// One cell visited by [`Grid::iter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a, T> {
    pub column: usize,
    pub row: usize,
    pub occupant: Option<&'a T>,
}

/// A dynamic `columns × rows` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    columns: usize,
    rows: usize,
    cells: Vec<Option<T>>,
    center_modes: Vec<Alignment>,
    column_widths: Vec<f64>,
    row_heights: Vec<f64>,
}

impl<T> Default for Grid<T> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<T> Grid<T> {
    /// Create an empty grid. All cells are centered and all tracks are AUTO sized.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: std::iter::repeat_with(|| None).take(columns * rows).collect(),
            center_modes: vec![Alignment::Center; columns * rows],
            column_widths: vec![COLUMN_WIDTH_AUTO; columns],
            row_heights: vec![ROW_HEIGHT_AUTO; rows],
        }
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `true` when the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    fn index(&self, column: usize, row: usize) -> usize {
        column * self.rows + row
    }

    fn check_column(&self, column: usize) -> GridResult<()> {
        if column < self.columns {
            Ok(())
        } else {
            Err(GridError::ColumnOutOfRange { index: column, columns: self.columns })
        }
    }

    fn check_row(&self, row: usize) -> GridResult<()> {
        if row < self.rows {
            Ok(())
        } else {
            Err(GridError::RowOutOfRange { index: row, rows: self.rows })
        }
    }

    fn check_cell(&self, column: usize, row: usize) -> GridResult<usize> {
        self.check_column(column)?;
        self.check_row(row)?;
        Ok(self.index(column, row))
    }

    // --- cell contents ---

    /// Occupant of a cell. Out-of-range indices are an error, not `None`.
    pub fn get(&self, column: usize, row: usize) -> GridResult<Option<&T>> {
        let index = self.check_cell(column, row)?;
        Ok(self.cells[index].as_ref())
    }

    /// Overwrite a cell and hand back the previous occupant.
    ///
    /// The previous occupant is not detached from anything; that is up to the caller.
    pub fn set(&mut self, column: usize, row: usize, value: Option<T>) -> GridResult<Option<T>> {
        let index = self.check_cell(column, row)?;
        Ok(std::mem::replace(&mut self.cells[index], value))
    }

    /// Occupants of one column, top to bottom.
    pub fn column(&self, column: usize) -> GridResult<Vec<Option<&T>>> {
        self.check_column(column)?;
        Ok((0..self.rows).map(|row| self.cells[self.index(column, row)].as_ref()).collect())
    }

    /// Occupants of one row, left to right.
    pub fn row(&self, row: usize) -> GridResult<Vec<Option<&T>>> {
        self.check_row(row)?;
        Ok((0..self.columns).map(|column| self.cells[self.index(column, row)].as_ref()).collect())
    }

    fn column_occupied(&self, column: usize) -> bool {
        (0..self.rows).any(|row| self.cells[self.index(column, row)].is_some())
    }

    fn row_occupied(&self, row: usize) -> bool {
        (0..self.columns).any(|column| self.cells[self.index(column, row)].is_some())
    }

    // --- alignment ---

    /// How an occupant sits inside its cell.
    pub fn cell_center_mode(&self, column: usize, row: usize) -> GridResult<Alignment> {
        let index = self.check_cell(column, row)?;
        Ok(self.center_modes[index])
    }

    /// Align a single cell.
    pub fn set_cell_center_mode(&mut self, column: usize, row: usize, alignment: Alignment) -> GridResult<()> {
        let index = self.check_cell(column, row)?;
        self.center_modes[index] = alignment;
        Ok(())
    }

    /// Align every cell of a column.
    pub fn set_column_center_mode(&mut self, column: usize, alignment: Alignment) -> GridResult<()> {
        self.check_column(column)?;
        let start = self.index(column, 0);
        self.center_modes[start..start + self.rows].fill(alignment);
        Ok(())
    }

    /// Align every cell of a row.
    pub fn set_row_center_mode(&mut self, row: usize, alignment: Alignment) -> GridResult<()> {
        self.check_row(row)?;
        for column in 0..self.columns {
            let index = self.index(column, row);
            self.center_modes[index] = alignment;
        }
        Ok(())
    }

    /// Align every cell.
    pub fn set_center_mode(&mut self, alignment: Alignment) {
        self.center_modes.fill(alignment);
    }

    // --- track sizes ---

    /// Preferred width of a column, [`COLUMN_WIDTH_AUTO`] for auto.
    pub fn column_width(&self, column: usize) -> GridResult<f64> {
        self.check_column(column)?;
        Ok(self.column_widths[column])
    }

    /// All preferred column widths.
    pub fn column_widths(&self) -> &[f64] {
        &self.column_widths
    }

    /// Width must be non-negative or AUTO.
    pub fn set_column_width(&mut self, column: usize, width: f64) -> GridResult<()> {
        self.check_column(column)?;
        check_size(width)?;
        self.column_widths[column] = width;
        Ok(())
    }

    /// Replace every column width. The slice length must equal the column count.
    pub fn set_column_widths(&mut self, widths: &[f64]) -> GridResult<()> {
        if widths.len() != self.columns {
            return Err(GridError::SizeMismatch { expected: self.columns, actual: widths.len() });
        }
        if let Some(&bad) = widths.iter().find(|w| !is_valid_size(**w)) {
            return Err(GridError::InvalidSize(bad));
        }
        self.column_widths.copy_from_slice(widths);
        Ok(())
    }

    /// Give every column the same preferred width.
    pub fn fill_column_widths(&mut self, width: f64) -> GridResult<()> {
        check_size(width)?;
        self.column_widths.fill(width);
        Ok(())
    }

    /// Preferred height of a row, [`ROW_HEIGHT_AUTO`] for auto.
    pub fn row_height(&self, row: usize) -> GridResult<f64> {
        self.check_row(row)?;
        Ok(self.row_heights[row])
    }

    /// All preferred row heights.
    pub fn row_heights(&self) -> &[f64] {
        &self.row_heights
    }

    /// Height must be non-negative or AUTO.
    pub fn set_row_height(&mut self, row: usize, height: f64) -> GridResult<()> {
        self.check_row(row)?;
        check_size(height)?;
        self.row_heights[row] = height;
        Ok(())
    }

    /// Replace every row height. The slice length must equal the row count.
    pub fn set_row_heights(&mut self, heights: &[f64]) -> GridResult<()> {
        if heights.len() != self.rows {
            return Err(GridError::SizeMismatch { expected: self.rows, actual: heights.len() });
        }
        if let Some(&bad) = heights.iter().find(|h| !is_valid_size(**h)) {
            return Err(GridError::InvalidSize(bad));
        }
        self.row_heights.copy_from_slice(heights);
        Ok(())
    }

    /// Give every row the same preferred height.
    pub fn fill_row_heights(&mut self, height: f64) -> GridResult<()> {
        check_size(height)?;
        self.row_heights.fill(height);
        Ok(())
    }

    // --- structure ---

    /// Reallocate to `columns × rows`. `source` maps a new cell to the old cell
    /// it copies from; unmapped cells start empty and centered. Occupants of old
    /// cells that were not copied are returned.
    fn reshape(
        &mut self,
        columns: usize,
        rows: usize,
        source: impl Fn(usize, usize) -> Option<(usize, usize)>,
    ) -> Vec<T> {
        let mut old_cells = std::mem::take(&mut self.cells);
        let old_modes = std::mem::take(&mut self.center_modes);
        let old_rows = self.rows;

        let mut cells: Vec<Option<T>> = std::iter::repeat_with(|| None).take(columns * rows).collect();
        let mut modes = vec![Alignment::Center; columns * rows];

        for column in 0..columns {
            for row in 0..rows {
                if let Some((old_column, old_row)) = source(column, row) {
                    let old_index = old_column * old_rows + old_row;
                    let index = column * rows + row;
                    cells[index] = old_cells[old_index].take();
                    modes[index] = old_modes[old_index];
                }
            }
        }

        self.cells = cells;
        self.center_modes = modes;
        self.columns = columns;
        self.rows = rows;

        old_cells.into_iter().flatten().collect()
    }

    /// Reset to `0 × 0`, returning every occupant.
    fn clear_to_empty(&mut self) -> Vec<T> {
        let removed = std::mem::take(&mut self.cells).into_iter().flatten().collect();
        self.center_modes.clear();
        self.column_widths.clear();
        self.row_heights.clear();
        self.columns = 0;
        self.rows = 0;
        removed
    }

    /// Extend the grid on each side, shifting existing content by `(left, top)`.
    ///
    /// Returns `false` without touching the grid when all four amounts are zero.
    pub fn grow(&mut self, left: usize, right: usize, top: usize, bottom: usize) -> bool {
        if left == 0 && right == 0 && top == 0 && bottom == 0 {
            return false;
        }

        let (old_columns, old_rows) = (self.columns, self.rows);
        self.reshape(old_columns + left + right, old_rows + top + bottom, |column, row| {
            let inside = column >= left && column < left + old_columns && row >= top && row < top + old_rows;
            inside.then(|| (column - left, row - top))
        });

        self.column_widths.splice(0..0, std::iter::repeat_n(COLUMN_WIDTH_AUTO, left));
        self.column_widths.extend(std::iter::repeat_n(COLUMN_WIDTH_AUTO, right));
        self.row_heights.splice(0..0, std::iter::repeat_n(ROW_HEIGHT_AUTO, top));
        self.row_heights.extend(std::iter::repeat_n(ROW_HEIGHT_AUTO, bottom));

        true
    }

    /// Strip empty outer columns and rows. Returns `true` if the size changed.
    pub fn trim(&mut self) -> bool {
        let columns_changed = self.trim_columns();
        let rows_changed = self.trim_rows();
        columns_changed || rows_changed
    }

    /// Strip empty outer columns. An all-empty grid collapses to `0 × 0`.
    pub fn trim_columns(&mut self) -> bool {
        let old = (self.columns, self.rows);
        let first = (0..self.columns).find(|&c| self.column_occupied(c));
        let last = (0..self.columns).rev().find(|&c| self.column_occupied(c));

        match (first, last) {
            (Some(first), Some(last)) => {
                if first > 0 || last + 1 < self.columns {
                    self.reshape(last - first + 1, self.rows, |column, row| Some((column + first, row)));
                    self.column_widths = self.column_widths[first..=last].to_vec();
                }
            }
            _ => {
                self.clear_to_empty();
            }
        }

        old != (self.columns, self.rows)
    }

    /// Strip empty outer rows. An all-empty grid collapses to `0 × 0`.
    pub fn trim_rows(&mut self) -> bool {
        let old = (self.columns, self.rows);
        let first = (0..self.rows).find(|&r| self.row_occupied(r));
        let last = (0..self.rows).rev().find(|&r| self.row_occupied(r));

        match (first, last) {
            (Some(first), Some(last)) => {
                if first > 0 || last + 1 < self.rows {
                    self.reshape(self.columns, last - first + 1, |column, row| Some((column, row + first)));
                    self.row_heights = self.row_heights[first..=last].to_vec();
                }
            }
            _ => {
                self.clear_to_empty();
            }
        }

        old != (self.columns, self.rows)
    }

    /// Insert `count` empty AUTO-sized columns before `index`.
    pub fn add_columns(&mut self, index: usize, count: usize) -> GridResult<()> {
        if index > self.columns {
            return Err(GridError::InsertionOutOfRange { index, len: self.columns });
        }
        if count == 0 {
            return Ok(());
        }

        self.reshape(self.columns + count, self.rows, |column, row| {
            if column < index {
                Some((column, row))
            } else if column >= index + count {
                Some((column - count, row))
            } else {
                None
            }
        });
        self.column_widths.splice(index..index, std::iter::repeat_n(COLUMN_WIDTH_AUTO, count));
        Ok(())
    }

    /// Insert `count` empty AUTO-sized rows before `index`.
    pub fn add_rows(&mut self, index: usize, count: usize) -> GridResult<()> {
        if index > self.rows {
            return Err(GridError::InsertionOutOfRange { index, len: self.rows });
        }
        if count == 0 {
            return Ok(());
        }

        self.reshape(self.columns, self.rows + count, |column, row| {
            if row < index {
                Some((column, row))
            } else if row >= index + count {
                Some((column, row - count))
            } else {
                None
            }
        });
        self.row_heights.splice(index..index, std::iter::repeat_n(ROW_HEIGHT_AUTO, count));
        Ok(())
    }

    /// Remove one column, shifting later columns left, and return its occupants.
    ///
    /// Removing the last remaining column resets the grid to `0 × 0`.
    pub fn remove_column(&mut self, index: usize) -> GridResult<Vec<T>> {
        self.check_column(index)?;

        if self.columns == 1 {
            return Ok(self.clear_to_empty());
        }

        let removed = self.reshape(self.columns - 1, self.rows, |column, row| {
            Some((if column < index { column } else { column + 1 }, row))
        });
        self.column_widths.remove(index);
        Ok(removed)
    }

    /// Remove one row, shifting later rows up, and return its occupants.
    ///
    /// Removing the last remaining row resets the grid to `0 × 0`.
    pub fn remove_row(&mut self, index: usize) -> GridResult<Vec<T>> {
        self.check_row(index)?;

        if self.rows == 1 {
            return Ok(self.clear_to_empty());
        }

        let removed = self.reshape(self.columns, self.rows - 1, |column, row| {
            Some((column, if row < index { row } else { row + 1 }))
        });
        self.row_heights.remove(index);
        Ok(removed)
    }

    /// Remove every column without an occupant. Collapses to `0 × 0` if none remain.
    pub fn remove_empty_columns(&mut self) {
        let keep: Vec<usize> = (0..self.columns).filter(|&c| self.column_occupied(c)).collect();

        if keep.is_empty() {
            self.clear_to_empty();
            return;
        }
        if keep.len() == self.columns {
            return;
        }

        self.reshape(keep.len(), self.rows, |column, row| Some((keep[column], row)));
        self.column_widths = keep.iter().map(|&c| self.column_widths[c]).collect();
    }

    /// Remove every row without an occupant. Collapses to `0 × 0` if none remain.
    pub fn remove_empty_rows(&mut self) {
        let keep: Vec<usize> = (0..self.rows).filter(|&r| self.row_occupied(r)).collect();

        if keep.is_empty() {
            self.clear_to_empty();
            return;
        }
        if keep.len() == self.rows {
            return;
        }

        self.reshape(self.columns, keep.len(), |column, row| Some((column, keep[row])));
        self.row_heights = keep.iter().map(|&r| self.row_heights[r]).collect();
    }

    // --- iteration ---

    /// Column-major traversal: column 0 rows `0..rows`, then column 1, and so on.
    pub fn iter(&self) -> GridIter<'_, T> {
        GridIter { grid: self, position: 0 }
    }

    /// Only the occupied cells, in column-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.iter().filter_map(|cell| cell.occupant.map(|occupant| (cell.column, cell.row, occupant)))
    }
}

impl<T: PartialEq> Grid<T> {
    /// Cell holding `value`, if any.
    pub fn position_of(&self, value: &T) -> Option<(usize, usize)> {
        self.occupied()
            .find(|(_, _, occupant)| *occupant == value)
            .map(|(column, row, _)| (column, row))
    }
}

/// Iterator returned by [`Grid::iter`].
pub struct GridIter<'a, T> {
    grid: &'a Grid<T>,
    position: usize,
}

impl<'a, T> Iterator for GridIter<'a, T> {
    type Item = GridCell<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.grid.rows == 0 || self.position >= self.grid.cells.len() {
            return None;
        }
        let column = self.position / self.grid.rows;
        let row = self.position % self.grid.rows;
        let occupant = self.grid.cells[self.position].as_ref();
        self.position += 1;
        Some(GridCell { column, row, occupant })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.cells.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = GridCell<'a, T>;
    type IntoIter = GridIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Prints one line per column, `X` for an occupied cell and `0` for an empty one.
impl<T> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#Rows: {}", self.rows)?;
        write!(f, "#Columns: {}", self.columns)?;
        for column in 0..self.columns {
            let cells: Vec<&str> = (0..self.rows)
                .map(|row| if self.cells[self.index(column, row)].is_some() { "X" } else { "0" })
                .collect();
            write!(f, "\n[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3×3 grid where cell (c, r) holds `c * 10 + r`.
    fn filled() -> Grid<u32> {
        let mut grid = Grid::new(3, 3);
        for column in 0..3 {
            for row in 0..3 {
                grid.set(column, row, Some((column * 10 + row) as u32)).unwrap();
            }
        }
        grid
    }

    fn assert_consistent<T>(grid: &Grid<T>) {
        assert_eq!(grid.column_widths().len(), grid.columns());
        assert_eq!(grid.row_heights().len(), grid.rows());
    }

    #[test]
    fn test_new_grid_defaults() {
        let grid: Grid<u32> = Grid::new(4, 2);
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 2);
        assert_consistent(&grid);
        assert!(grid.is_empty());
        assert_eq!(grid.cell_center_mode(3, 1).unwrap(), Alignment::Center);
        assert_eq!(grid.column_width(0).unwrap(), COLUMN_WIDTH_AUTO);
        assert_eq!(grid.row_height(1).unwrap(), ROW_HEIGHT_AUTO);
    }

    #[test]
    fn test_get_set_out_of_range() {
        let mut grid = filled();
        assert_eq!(grid.get(3, 0), Err(GridError::ColumnOutOfRange { index: 3, columns: 3 }));
        assert_eq!(grid.get(0, 3), Err(GridError::RowOutOfRange { index: 3, rows: 3 }));
        assert!(grid.set(5, 5, Some(1)).is_err());
        assert_eq!(grid, filled());
    }

    #[test]
    fn test_set_returns_previous_occupant() {
        let mut grid = filled();
        assert_eq!(grid.set(1, 1, Some(99)).unwrap(), Some(11));
        assert_eq!(grid.get(1, 1).unwrap(), Some(&99));
        assert_eq!(grid.set(1, 1, None).unwrap(), Some(99));
        assert_eq!(grid.get(1, 1).unwrap(), None);
    }

    #[test]
    fn test_center_modes() {
        let mut grid = filled();
        grid.set_column_center_mode(1, Alignment::TopLeft).unwrap();
        assert_eq!(grid.cell_center_mode(1, 2).unwrap(), Alignment::TopLeft);
        assert_eq!(grid.cell_center_mode(0, 2).unwrap(), Alignment::Center);

        grid.set_row_center_mode(0, Alignment::BottomRight).unwrap();
        assert_eq!(grid.cell_center_mode(2, 0).unwrap(), Alignment::BottomRight);
        assert_eq!(grid.cell_center_mode(1, 1).unwrap(), Alignment::TopLeft);

        grid.set_center_mode(Alignment::CenterLeft);
        assert!(grid.iter().all(|c| grid.cell_center_mode(c.column, c.row).unwrap() == Alignment::CenterLeft));

        assert!(grid.set_row_center_mode(3, Alignment::Center).is_err());
    }

    #[test]
    fn test_sizes_validation() {
        let mut grid = filled();
        grid.set_column_width(0, 25.0).unwrap();
        grid.set_column_width(1, COLUMN_WIDTH_AUTO).unwrap();
        assert_eq!(grid.set_column_width(2, -3.0), Err(GridError::InvalidSize(-3.0)));
        assert_eq!(grid.column_widths(), &[25.0, COLUMN_WIDTH_AUTO, COLUMN_WIDTH_AUTO]);

        assert_eq!(
            grid.set_row_heights(&[1.0, 2.0]),
            Err(GridError::SizeMismatch { expected: 3, actual: 2 })
        );
        assert_eq!(grid.set_row_heights(&[1.0, -2.0, 3.0]), Err(GridError::InvalidSize(-2.0)));
        assert_eq!(grid.row_heights(), &[ROW_HEIGHT_AUTO; 3]);
        grid.set_row_heights(&[1.0, 0.0, ROW_HEIGHT_AUTO]).unwrap();
        assert_eq!(grid.row_height(1).unwrap(), 0.0);

        grid.fill_row_heights(7.0).unwrap();
        assert_eq!(grid.row_heights(), &[7.0; 3]);
        assert!(grid.fill_column_widths(f64::NAN).is_err());
    }

    #[test]
    fn test_grow_zero_is_noop() {
        let mut grid = filled();
        assert!(!grid.grow(0, 0, 0, 0));
        assert_eq!(grid, filled());
    }

    #[test]
    fn test_grow_shifts_content() {
        let mut grid = filled();
        grid.set_column_width(0, 12.0).unwrap();
        grid.set_cell_center_mode(2, 2, Alignment::TopRight).unwrap();

        assert!(grid.grow(1, 2, 2, 1));
        assert_eq!((grid.columns(), grid.rows()), (6, 6));
        assert_consistent(&grid);

        for column in 0..3 {
            for row in 0..3 {
                assert_eq!(grid.get(column + 1, row + 2).unwrap(), Some(&((column * 10 + row) as u32)));
            }
        }
        assert_eq!(grid.get(0, 0).unwrap(), None);
        assert_eq!(grid.cell_center_mode(3, 4).unwrap(), Alignment::TopRight);
        assert_eq!(grid.cell_center_mode(5, 5).unwrap(), Alignment::Center);
        assert_eq!(grid.column_widths(), &[COLUMN_WIDTH_AUTO, 12.0, -1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_trim_all_empty_collapses() {
        let mut grid: Grid<u32> = Grid::new(4, 5);
        assert!(grid.trim());
        assert_eq!((grid.columns(), grid.rows()), (0, 0));
        assert_consistent(&grid);
    }

    #[test]
    fn test_trim_strips_outer_tracks() {
        let mut grid: Grid<u32> = Grid::new(5, 5);
        grid.set(1, 2, Some(7)).unwrap();
        grid.set(3, 3, Some(8)).unwrap();
        grid.set_column_width(3, 40.0).unwrap();

        assert!(grid.trim());
        assert_eq!((grid.columns(), grid.rows()), (3, 2));
        assert_consistent(&grid);
        assert_eq!(grid.get(0, 0).unwrap(), Some(&7));
        assert_eq!(grid.get(2, 1).unwrap(), Some(&8));
        assert_eq!(grid.column_width(2).unwrap(), 40.0);

        assert!(!grid.trim());
    }

    #[test]
    fn test_add_columns_and_rows() {
        let mut grid = filled();
        grid.add_columns(1, 2).unwrap();
        assert_eq!(grid.columns(), 5);
        assert_consistent(&grid);
        assert_eq!(grid.get(0, 0).unwrap(), Some(&0));
        assert_eq!(grid.get(1, 0).unwrap(), None);
        assert_eq!(grid.get(3, 1).unwrap(), Some(&11));
        assert_eq!(grid.get(4, 2).unwrap(), Some(&22));

        grid.add_rows(3, 1).unwrap();
        assert_eq!(grid.rows(), 4);
        assert_consistent(&grid);
        assert_eq!(grid.get(4, 3).unwrap(), None);
        assert_eq!(grid.get(4, 2).unwrap(), Some(&22));

        assert_eq!(grid.add_rows(5, 1), Err(GridError::InsertionOutOfRange { index: 5, len: 4 }));
        assert_eq!(grid.rows(), 4);
    }

    #[test]
    fn test_remove_row_shifts_up() {
        let mut grid = filled();
        let removed = grid.remove_row(1).unwrap();
        assert_eq!(removed, vec![1, 11, 21]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.get(1, 1).unwrap(), Some(&12));
        assert_consistent(&grid);
    }

    #[test]
    fn test_remove_column_shifts_left() {
        let mut grid = filled();
        grid.set_column_width(2, 30.0).unwrap();
        grid.remove_column(0).unwrap();
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.get(0, 0).unwrap(), Some(&10));
        assert_eq!(grid.column_widths(), &[COLUMN_WIDTH_AUTO, 30.0]);
        assert!(grid.remove_column(2).is_err());
    }

    #[test]
    fn test_remove_last_column_resets_both_dimensions() {
        let mut grid: Grid<u32> = Grid::new(1, 4);
        grid.set(0, 2, Some(5)).unwrap();
        let removed = grid.remove_column(0).unwrap();
        assert_eq!(removed, vec![5]);
        assert_eq!((grid.columns(), grid.rows()), (0, 0));
        assert_consistent(&grid);
    }

    #[test]
    fn test_remove_last_row_resets_both_dimensions() {
        let mut grid: Grid<u32> = Grid::new(3, 1);
        grid.remove_row(0).unwrap();
        assert_eq!((grid.columns(), grid.rows()), (0, 0));
        assert_consistent(&grid);
    }

    #[test]
    fn test_remove_empty_columns_inner() {
        let mut grid = filled();
        for row in 0..3 {
            grid.set(1, row, None).unwrap();
        }
        grid.remove_empty_columns();
        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.get(1, 2).unwrap(), Some(&22));
        assert_consistent(&grid);

        let snapshot = grid.clone();
        grid.remove_empty_columns();
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_remove_empty_rows_all_empty() {
        let mut grid: Grid<u32> = Grid::new(2, 2);
        grid.remove_empty_rows();
        assert_eq!((grid.columns(), grid.rows()), (0, 0));
        assert_consistent(&grid);
    }

    #[test]
    fn test_iteration_is_column_major() {
        let grid = filled();
        let order: Vec<(usize, usize)> = grid.iter().map(|c| (c.column, c.row)).collect();
        assert_eq!(order[..4], [(0, 0), (0, 1), (0, 2), (1, 0)]);
        assert_eq!(order.len(), 9);
        assert_eq!(grid.position_of(&21), Some((2, 1)));

        let empty: Grid<u32> = Grid::new(3, 0);
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_display() {
        let mut grid: Grid<u32> = Grid::new(2, 2);
        grid.set(1, 0, Some(1)).unwrap();
        assert_eq!(grid.to_string(), "#Rows: 2\n#Columns: 2\n[0, 0]\n[X, 0]");
    }
}
