//! Zigzag diagonal fill.
//!
//! The path starts at the top-left cell and sweeps the grid one
//! anti-diagonal (`row + col = d`) at a time. Odd diagonals are walked
//! bottom-left to top-right, even diagonals top-right to bottom-left. Where a
//! diagonal meets the border the path steps RIGHT along the top or bottom
//! edge, or DOWN along the left or right edge, onto the start of the next
//! diagonal.
//!
//! The fill is split in two triangular regions. Diagonals with `d < height`
//! start on the left edge; the rest start on the bottom edge. The second pass
//! is offset by the parity of the height so both passes agree on the seam.

use tracing::debug;

use crate::direction::Direction;
use crate::error::{PathError, Result};
use crate::grid::{DirectionGrid, MIN_DIMENSION};

/// Build the direction grid for a `width` x `height` zigzag path.
///
/// Following the directions from `(0, 0)` visits every cell exactly once and
/// ends on [`Direction::Done`] at `(height - 1, width - 1)`.
pub fn build(width: usize, height: usize) -> Result<DirectionGrid> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(PathError::InvalidDimension { width, height });
    }

    let mut fill = Fill::new(width, height);
    fill.seed_border();
    fill.resolve_corners();
    fill.upper_left_diagonals();
    fill.lower_right_diagonals();
    fill.set(height - 1, width - 1, Direction::Done);

    let grid = fill.finish()?;
    debug!(width, height, "built direction grid");
    Ok(grid)
}

/// Partially assigned grid.
struct Fill {
    width: usize,
    height: usize,
    cells: Vec<Option<Direction>>,
}

impl Fill {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    fn set(&mut self, row: usize, col: usize, direction: Direction) {
        self.cells[row * self.width + col] = Some(direction);
    }

    /// Edge cells where a diagonal ends.
    fn seed_border(&mut self) {
        let (w, h) = (self.width, self.height);

        for row in (0..h).step_by(2) {
            self.set(row, 0, Direction::Down);
        }
        for col in (1..w).step_by(2) {
            self.set(0, col, Direction::Right);
        }
        // Right column ends the odd diagonals: row + (w - 1) odd.
        for row in (w % 2..h).step_by(2) {
            self.set(row, w - 1, Direction::Down);
        }
        // Bottom row ends the even diagonals: (h - 1) + col even.
        for col in ((h + 1) % 2..w).step_by(2) {
            self.set(h - 1, col, Direction::Right);
        }
    }

    fn resolve_corners(&mut self) {
        let (w, h) = (self.width, self.height);

        let bottom_left = if h % 2 == 0 {
            Direction::UpRight
        } else {
            Direction::Right
        };
        self.set(h - 1, 0, bottom_left);

        let top_right = if w % 2 == 0 {
            Direction::Down
        } else {
            Direction::DownLeft
        };
        self.set(0, w - 1, top_right);
    }

    /// Diagonals starting on the left edge (`d < height`).
    fn upper_left_diagonals(&mut self) {
        let (w, h) = (self.width, self.height);

        for i in (1..h).step_by(2) {
            // (i, 0) upward, stopping short of the top row and the right column.
            for k in 0..i.min(w - 1) {
                self.set(i - k, k, Direction::UpRight);
            }

            let d = i + 1;
            if d < h {
                // Top or right end of the diagonal down to just above the left edge.
                for row in d.saturating_sub(w - 1)..d {
                    self.set(row, d - row, Direction::DownLeft);
                }
            }
        }
    }

    /// Diagonals starting on the bottom edge (`d >= height - 1`).
    fn lower_right_diagonals(&mut self) {
        let (w, h) = (self.width, self.height);

        for i in (h % 2..w).step_by(2) {
            // (h - 1, i) upward, stopping short of the top row and the right column.
            for k in 0..(h - 1).min(w - 1 - i) {
                self.set(h - 1 - k, i + k, Direction::UpRight);
            }

            if i + 1 < w {
                let d = h + i;
                // Right end of the diagonal down to just above the bottom row.
                for row in d.saturating_sub(w - 1)..h - 1 {
                    self.set(row, d - row, Direction::DownLeft);
                }
            }
        }
    }

    fn finish(self) -> Result<DirectionGrid> {
        let width = self.width;
        let mut cells = Vec::with_capacity(self.cells.len());
        for (idx, cell) in self.cells.into_iter().enumerate() {
            match cell {
                Some(direction) => cells.push(direction),
                None => {
                    return Err(PathError::Unassigned {
                        row: idx / width,
                        col: idx % width,
                    })
                }
            }
        }
        Ok(DirectionGrid::from_parts(width, self.height, cells))
    }
}
