//! Error types for grid building and path emission.

use thiserror::Error;

use crate::direction::Direction;

/// Errors that can occur while building or walking a direction grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Grid is smaller than 2x2 in either dimension.
    #[error("invalid grid dimensions {width}x{height}: width and height must be at least 2")]
    InvalidDimension {
        /// Requested number of columns.
        width: usize,
        /// Requested number of rows.
        height: usize,
    },

    /// The walk would step outside the grid.
    #[error("step {direction:?} from ({row}, {col}) leaves the grid")]
    OutOfBounds {
        /// Row of the cell the step was taken from.
        row: usize,
        /// Column of the cell the step was taken from.
        col: usize,
        /// Direction that was followed.
        direction: Direction,
    },

    /// The walk exhausted its step budget without reaching DONE.
    #[error("path did not terminate within {steps} steps")]
    PathDidNotTerminate {
        /// Number of steps taken before giving up.
        steps: usize,
    },

    /// The walk entered a cell it had already visited.
    #[error("path revisits cell ({row}, {col})")]
    Revisit {
        /// Row of the revisited cell.
        row: usize,
        /// Column of the revisited cell.
        col: usize,
    },

    /// The walk terminated without covering every cell.
    #[error("path visits {visited} of {total} cells")]
    Incomplete {
        /// Number of distinct cells visited.
        visited: usize,
        /// Number of cells in the grid.
        total: usize,
    },

    /// DONE was reached somewhere other than the bottom-right cell.
    #[error("path ends at ({row}, {col}) instead of the bottom-right cell")]
    WrongTerminal {
        /// Row of the terminal cell.
        row: usize,
        /// Column of the terminal cell.
        col: usize,
    },

    /// The builder left a cell without a direction.
    #[error("cell ({row}, {col}) was never assigned a direction")]
    Unassigned {
        /// Row of the unassigned cell.
        row: usize,
        /// Column of the unassigned cell.
        col: usize,
    },

    /// Rows of a grid description have different lengths.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Numeric direction code outside 1..=9.
    #[error("unknown direction code {0}")]
    InvalidCode(u8),

    /// Invalid job settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
