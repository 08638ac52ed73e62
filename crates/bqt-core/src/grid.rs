// ABOUTME: Rectangular character grid that every layout pass reads from.
// ABOUTME: Mutations return a fresh grid so derived state is always rebuilt.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
}

/// A `height x width` buffer of single characters, stored row-major.
///
/// Row 0 / column 0 is the top-left cell. A grid is never empty and never
/// ragged; both are rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<char>,
    height: usize,
    width: usize,
}

impl Grid {
    /// Build a grid from equal-length rows
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let width = match rows.first() {
            Some(first) => first.as_ref().chars().count(),
            None => return Err(GridError::EmptyGrid),
        };
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.as_ref().chars());
            let found = cells.len() - before;
            if found != width {
                return Err(GridError::RaggedGrid {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        Ok(Self {
            cells,
            height: rows.len(),
            width,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// (height, width)
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<char, GridError> {
        if row >= self.height || col >= self.width {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.cells[row * self.width + col])
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Result<&[char], GridError> {
        if row >= self.height {
            return Err(self.out_of_bounds(row, 0));
        }
        let start = row * self.width;
        Ok(&self.cells[start..start + self.width])
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: usize) -> Result<Vec<char>, GridError> {
        if col >= self.width {
            return Err(self.out_of_bounds(0, col));
        }
        Ok(self
            .cells
            .iter()
            .skip(col)
            .step_by(self.width)
            .copied()
            .collect())
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.cells.contains(&symbol)
    }

    /// Distinct symbols present, in ascending order
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols = self.cells.clone();
        symbols.sort_unstable();
        symbols.dedup();
        symbols
    }

    /// Insert `count` copies of row `source` so the first copy lands at index `at`.
    pub fn with_rows_inserted(
        &self,
        at: usize,
        source: usize,
        count: usize,
    ) -> Result<Self, GridError> {
        if at > self.height {
            return Err(self.out_of_bounds(at, 0));
        }
        let template = self.row(source)?.to_vec();

        let mut cells = Vec::with_capacity(self.cells.len() + count * self.width);
        cells.extend_from_slice(&self.cells[..at * self.width]);
        for _ in 0..count {
            cells.extend_from_slice(&template);
        }
        cells.extend_from_slice(&self.cells[at * self.width..]);

        Ok(Self {
            cells,
            height: self.height + count,
            width: self.width,
        })
    }

    /// Remove rows `at..at + count`.
    pub fn with_rows_removed(&self, at: usize, count: usize) -> Result<Self, GridError> {
        let end = at + count;
        if end > self.height {
            return Err(self.out_of_bounds(end.saturating_sub(1), 0));
        }
        if count == self.height {
            return Err(GridError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(self.cells.len() - count * self.width);
        cells.extend_from_slice(&self.cells[..at * self.width]);
        cells.extend_from_slice(&self.cells[end * self.width..]);

        Ok(Self {
            cells,
            height: self.height - count,
            width: self.width,
        })
    }

    /// Insert `count` copies of column `source` so the first copy lands at index `at`.
    pub fn with_columns_inserted(
        &self,
        at: usize,
        source: usize,
        count: usize,
    ) -> Result<Self, GridError> {
        if at > self.width {
            return Err(self.out_of_bounds(0, at));
        }
        let template = self.column(source)?;
        let width = self.width + count;

        let mut cells = Vec::with_capacity(self.height * width);
        for (row, fill) in template.iter().enumerate() {
            let line = &self.cells[row * self.width..(row + 1) * self.width];
            cells.extend_from_slice(&line[..at]);
            cells.extend(std::iter::repeat(*fill).take(count));
            cells.extend_from_slice(&line[at..]);
        }

        Ok(Self {
            cells,
            height: self.height,
            width,
        })
    }

    /// Remove columns `at..at + count`.
    pub fn with_columns_removed(&self, at: usize, count: usize) -> Result<Self, GridError> {
        let end = at + count;
        if end > self.width {
            return Err(self.out_of_bounds(0, end.saturating_sub(1)));
        }
        if count == self.width {
            return Err(GridError::EmptyGrid);
        }
        let width = self.width - count;

        let mut cells = Vec::with_capacity(self.height * width);
        for line in self.cells.chunks(self.width) {
            cells.extend_from_slice(&line[..at]);
            cells.extend_from_slice(&line[end..]);
        }

        Ok(Self {
            cells,
            height: self.height,
            width,
        })
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> GridError {
        GridError::OutOfBounds {
            row,
            col,
            height: self.height,
            width: self.width,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for c in line {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&["AAX", "AAX", "XXX"]).unwrap()
    }

    #[test]
    fn builds_from_equal_rows() {
        let grid = sample();
        assert_eq!(grid.dims(), (3, 3));
        assert_eq!(grid.get(0, 2).unwrap(), 'X');
        assert_eq!(grid.get(1, 1).unwrap(), 'A');
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Grid::from_rows(&["AAA", "AA"]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedGrid {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_empty_input() {
        let rows: [&str; 0] = [];
        assert_eq!(Grid::from_rows(&rows).unwrap_err(), GridError::EmptyGrid);
        assert_eq!(Grid::from_rows(&[""]).unwrap_err(), GridError::EmptyGrid);
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        let grid = Grid::from_rows(&["é·A", "A·é"]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(1, 2).unwrap(), 'é');
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let grid = sample();
        assert!(matches!(
            grid.get(3, 0),
            Err(GridError::OutOfBounds { row: 3, col: 0, .. })
        ));
        assert!(grid.get(0, 3).is_err());
        assert!(grid.row(3).is_err());
        assert!(grid.column(3).is_err());
    }

    #[test]
    fn row_and_column_extraction() {
        let grid = sample();
        assert_eq!(grid.row(0).unwrap(), &['A', 'A', 'X']);
        assert_eq!(grid.column(0).unwrap(), vec!['A', 'A', 'X']);
        assert_eq!(grid.column(2).unwrap(), vec!['X', 'X', 'X']);
    }

    #[test]
    fn symbols_are_sorted_and_distinct() {
        let grid = Grid::from_rows(&["bA.", "Ab."]).unwrap();
        assert_eq!(grid.symbols(), vec!['.', 'A', 'b']);
        assert!(grid.contains('b'));
        assert!(!grid.contains('X'));
    }

    #[test]
    fn inserting_columns_copies_the_source() {
        let grid = sample();
        let wider = grid.with_columns_inserted(2, 2, 3).unwrap();
        assert_eq!(wider.dims(), (3, 6));
        assert_eq!(wider.to_string(), "AAXXXX\nAAXXXX\nXXXXXX");
        // original untouched
        assert_eq!(grid.dims(), (3, 3));
    }

    #[test]
    fn inserting_rows_copies_the_source() {
        let grid = Grid::from_rows(&["XA", "AB"]).unwrap();
        let taller = grid.with_rows_inserted(1, 1, 2).unwrap();
        assert_eq!(taller.to_string(), "XA\nAB\nAB\nAB");
    }

    #[test]
    fn removing_lines() {
        let grid = Grid::from_rows(&["ABCD", "EFGH", "IJKL"]).unwrap();
        assert_eq!(
            grid.with_columns_removed(1, 2).unwrap().to_string(),
            "AD\nEH\nIL"
        );
        assert_eq!(grid.with_rows_removed(0, 2).unwrap().to_string(), "IJKL");
        assert_eq!(grid.with_rows_removed(0, 3), Err(GridError::EmptyGrid));
        assert!(grid.with_columns_removed(3, 2).is_err());
    }

    #[test]
    fn display_joins_rows() {
        assert_eq!(sample().to_string(), "AAX\nAAX\nXXX");
    }
}
