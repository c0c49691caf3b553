//! Per-cell direction codes and their step vectors.

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};

/// Direction to the next cell of the path, or the end of the path.
///
/// Numeric codes run from 1 (`Up`) to 9 (`Done`) in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    /// One row up.
    Up,
    /// One row up, one column right.
    UpRight,
    /// One column right.
    Right,
    /// One row down, one column right.
    DownRight,
    /// One row down.
    Down,
    /// One row down, one column left.
    DownLeft,
    /// One column left.
    Left,
    /// One row up, one column left.
    UpLeft,
    /// Terminal cell of the path.
    Done,
}

/// Step vectors `(d_row, d_col)` indexed by `Direction as usize`.
const STEPS: [Option<(isize, isize)>; 9] = [
    Some((-1, 0)),
    Some((-1, 1)),
    Some((0, 1)),
    Some((1, 1)),
    Some((1, 0)),
    Some((1, -1)),
    Some((0, -1)),
    Some((-1, -1)),
    None,
];

impl Direction {
    /// All directions in code order.
    pub const ALL: [Direction; 9] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
        Direction::Done,
    ];

    /// Step vector `(d_row, d_col)`, or `None` for [`Direction::Done`].
    pub fn step(self) -> Option<(isize, isize)> {
        STEPS[self as usize]
    }

    /// Numeric code (1..=9).
    pub fn code(self) -> u8 {
        self as u8 + 1
    }

    /// Look up a direction by numeric code.
    pub fn from_code(code: u8) -> Result<Self> {
        code.checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize).copied())
            .ok_or(PathError::InvalidCode(code))
    }

    /// Is this the terminal marker?
    pub fn is_done(self) -> bool {
        self == Direction::Done
    }

    /// Single-character arrow used by the grid dump.
    pub fn glyph(self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::UpRight => '↗',
            Direction::Right => '→',
            Direction::DownRight => '↘',
            Direction::Down => '↓',
            Direction::DownLeft => '↙',
            Direction::Left => '←',
            Direction::UpLeft => '↖',
            Direction::Done => '●',
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = PathError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> u8 {
        direction.code()
    }
}
