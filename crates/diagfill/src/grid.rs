//! Direction grid storage and diagnostic dumps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{PathError, Result};

/// Smallest supported width or height.
pub const MIN_DIMENSION: usize = 2;

/// A grid position, row 0 at the top and column 0 at the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Cell {
    /// Create a new cell.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor reached by `direction`, if it exists inside a `width` x `height` grid.
    pub fn neighbor(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let (dr, dc) = direction.step()?;
        let row = self.row.checked_add_signed(dr).filter(|&r| r < height)?;
        let col = self.col.checked_add_signed(dc).filter(|&c| c < width)?;
        Some(Self { row, col })
    }
}

/// A `height` x `width` array of direction codes, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Direction>>", into = "Vec<Vec<Direction>>")]
pub struct DirectionGrid {
    width: usize,
    height: usize,
    cells: Vec<Direction>,
}

impl DirectionGrid {
    /// Build a grid from rows of directions.
    ///
    /// Rows must all have the same length and the grid must be at least 2x2.
    pub fn from_rows(rows: Vec<Vec<Direction>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(PathError::InvalidDimension { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(PathError::RaggedGrid {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            cells.extend(values);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from rows of numeric codes (1..=9).
    pub fn from_codes(rows: Vec<Vec<u8>>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Direction::from_code).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<Vec<Direction>>>>()?;
        Self::from_rows(rows)
    }

    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<Direction>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Direction at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Direction> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Direction at `cell`, or `None` outside the grid.
    pub fn at(&self, cell: Cell) -> Option<Direction> {
        self.get(cell.row, cell.col)
    }

    /// Start of every path: the top-left cell.
    pub fn start(&self) -> Cell {
        Cell::new(0, 0)
    }

    /// Designated end of the path: the bottom-right cell.
    pub fn terminal(&self) -> Cell {
        Cell::new(self.height - 1, self.width - 1)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Direction]> {
        self.cells.chunks(self.width)
    }

    /// Rows of numeric codes.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|d| d.code()).collect())
            .collect()
    }

    /// Render the grid as rows of arrow glyphs.
    pub fn render_arrows(&self) -> String {
        let mut out = String::with_capacity(self.len() * 4);
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|d| d.glyph().to_string()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

impl TryFrom<Vec<Vec<Direction>>> for DirectionGrid {
    type Error = PathError;

    fn try_from(rows: Vec<Vec<Direction>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<DirectionGrid> for Vec<Vec<Direction>> {
    fn from(grid: DirectionGrid) -> Self {
        grid.rows().map(<[Direction]>::to_vec).collect()
    }
}

/// Numeric code matrix, one row per line.
impl fmt::Display for DirectionGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            f.write_str(if idx == 0 { "[[" } else { " [" })?;
            for (col, dir) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", dir.code())?;
            }
            f.write_str("]")?;
            if idx + 1 == self.height {
                f.write_str("]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
