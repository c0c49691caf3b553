//! Walking a direction grid and turning it into move instructions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::Direction;
use crate::error::{PathError, Result};
use crate::grid::{Cell, DirectionGrid};

/// Kind of move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Positioning move to the path origin (`G0`).
    Rapid,
    /// Straight printing move (`G1`).
    Linear,
}

/// A straight move of the print head to a grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveInstruction {
    /// Move kind.
    pub kind: MoveKind,
    /// Target column.
    pub x: usize,
    /// Target row.
    pub y: usize,
    /// Layer height.
    pub z: f64,
}

impl MoveInstruction {
    /// Rapid move to `cell`.
    pub fn rapid(cell: Cell, z: f64) -> Self {
        Self {
            kind: MoveKind::Rapid,
            x: cell.col,
            y: cell.row,
            z,
        }
    }

    /// Linear move to `cell`.
    pub fn linear(cell: Cell, z: f64) -> Self {
        Self {
            kind: MoveKind::Linear,
            x: cell.col,
            y: cell.row,
            z,
        }
    }

    /// Target as a grid cell.
    pub fn target(&self) -> Cell {
        Cell::new(self.y, self.x)
    }
}

/// Ordered moves for one layer, starting with the rapid move to the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    /// Layer height of every move.
    pub layer_height: f64,
    /// Moves in print order.
    pub moves: Vec<MoveInstruction>,
}

impl Toolpath {
    /// Number of moves, origin move included.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Check if the toolpath has no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Printing moves only.
    pub fn linear_moves(&self) -> impl Iterator<Item = &MoveInstruction> {
        self.moves.iter().filter(|m| m.kind == MoveKind::Linear)
    }

    /// Final target, if any.
    pub fn end(&self) -> Option<Cell> {
        self.moves.last().map(MoveInstruction::target)
    }
}

/// Cursor state for a bounded walk over a grid.
struct Walker<'a> {
    grid: &'a DirectionGrid,
    cursor: Cell,
    steps: usize,
    budget: usize,
}

impl<'a> Walker<'a> {
    fn new(grid: &'a DirectionGrid) -> Self {
        Self {
            grid,
            cursor: grid.start(),
            steps: 0,
            budget: grid.len() + 1,
        }
    }

    fn current(&self) -> Direction {
        // The cursor never leaves the grid: `advance` checks every step.
        self.grid.at(self.cursor).unwrap_or(Direction::Done)
    }

    /// Follow the current direction one cell.
    ///
    /// Returns the direction that was followed, or `None` once DONE is reached.
    fn advance(&mut self) -> Result<Option<Direction>> {
        let direction = self.current();
        if direction.is_done() {
            return Ok(None);
        }
        if self.steps >= self.budget {
            return Err(PathError::PathDidNotTerminate { steps: self.steps });
        }

        let next = self
            .cursor
            .neighbor(direction, self.grid.width(), self.grid.height())
            .ok_or(PathError::OutOfBounds {
                row: self.cursor.row,
                col: self.cursor.col,
                direction,
            })?;
        self.cursor = next;
        self.steps += 1;
        Ok(Some(direction))
    }
}

/// Emit the move instructions for `grid` at a constant `layer_height`.
///
/// The first move is a rapid move to `(0, 0)`. A linear move is emitted each
/// time the direction under the cursor changes, so a straight run of cells
/// collapses to a single move to its far end.
pub fn emit(grid: &DirectionGrid, layer_height: f64) -> Result<Toolpath> {
    let mut walker = Walker::new(grid);
    let mut moves = vec![MoveInstruction::rapid(grid.start(), layer_height)];

    while let Some(followed) = walker.advance()? {
        if walker.current() != followed {
            moves.push(MoveInstruction::linear(walker.cursor, layer_height));
        }
    }

    debug!(
        width = grid.width(),
        height = grid.height(),
        steps = walker.steps,
        moves = moves.len(),
        "emitted toolpath"
    );

    Ok(Toolpath {
        layer_height,
        moves,
    })
}

/// Every cell visited by the walk from `(0, 0)` up to and including DONE.
pub fn trace(grid: &DirectionGrid) -> Result<Vec<Cell>> {
    let mut walker = Walker::new(grid);
    let mut cells = vec![walker.cursor];
    while walker.advance()?.is_some() {
        cells.push(walker.cursor);
    }
    Ok(cells)
}

/// Check that the walk visits every cell exactly once and ends at the
/// bottom-right cell.
pub fn verify(grid: &DirectionGrid) -> Result<()> {
    let mut walker = Walker::new(grid);
    let mut seen = vec![false; grid.len()];
    seen[0] = true;
    let mut visited = 1;

    while walker.advance()?.is_some() {
        let cell = walker.cursor;
        let idx = cell.row * grid.width() + cell.col;
        if seen[idx] {
            return Err(PathError::Revisit {
                row: cell.row,
                col: cell.col,
            });
        }
        seen[idx] = true;
        visited += 1;
    }

    if walker.cursor != grid.terminal() {
        return Err(PathError::WrongTerminal {
            row: walker.cursor.row,
            col: walker.cursor.col,
        });
    }
    if visited != grid.len() {
        return Err(PathError::Incomplete {
            visited,
            total: grid.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build;
    use proptest::prelude::*;

    fn targets(toolpath: &Toolpath) -> Vec<(usize, usize)> {
        toolpath.linear_moves().map(|m| (m.x, m.y)).collect()
    }

    #[test]
    fn test_emit_6x5_snapshot() {
        let grid = build(6, 5).unwrap();
        let toolpath = emit(&grid, 0.0).unwrap();

        assert_eq!(toolpath.moves[0], MoveInstruction::rapid(Cell::new(0, 0), 0.0));
        assert_eq!(
            targets(&toolpath),
            vec![
                (0, 1),
                (1, 0),
                (2, 0),
                (0, 2),
                (0, 3),
                (3, 0),
                (4, 0),
                (0, 4),
                (1, 4),
                (5, 0),
                (5, 1),
                (2, 4),
                (3, 4),
                (5, 2),
                (5, 3),
                (4, 4),
                (5, 4),
            ]
        );
        assert_eq!(toolpath.end(), Some(Cell::new(4, 5)));
    }

    #[test]
    fn test_emit_2x2() {
        let grid = build(2, 2).unwrap();
        let toolpath = emit(&grid, 0.2).unwrap();
        assert_eq!(targets(&toolpath), vec![(0, 1), (1, 0), (1, 1)]);
        assert!(toolpath.moves.iter().all(|m| m.z == 0.2));
    }

    #[test]
    fn test_straight_runs_collapse() {
        // Down the left column, then along the bottom row.
        let grid = DirectionGrid::from_codes(vec![
            vec![5, 5, 5],
            vec![5, 5, 5],
            vec![3, 3, 9],
        ])
        .unwrap();
        let toolpath = emit(&grid, 0.0).unwrap();
        assert_eq!(targets(&toolpath), vec![(0, 2), (2, 2)]);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = DirectionGrid::from_codes(vec![vec![7, 9], vec![9, 9]]).unwrap();
        assert_eq!(
            emit(&grid, 0.0),
            Err(PathError::OutOfBounds {
                row: 0,
                col: 0,
                direction: Direction::Left
            })
        );
    }

    #[test]
    fn test_cycle_does_not_terminate() {
        let grid = DirectionGrid::from_codes(vec![vec![3, 5], vec![1, 7]]).unwrap();
        assert_eq!(
            emit(&grid, 0.0),
            Err(PathError::PathDidNotTerminate { steps: 5 })
        );
        assert!(matches!(
            trace(&grid),
            Err(PathError::PathDidNotTerminate { .. })
        ));
    }

    #[test]
    fn test_verify_reports_revisit() {
        let grid = DirectionGrid::from_codes(vec![vec![5, 9], vec![1, 9]]).unwrap();
        assert_eq!(verify(&grid), Err(PathError::Revisit { row: 0, col: 0 }));
        assert!(matches!(
            emit(&grid, 0.0),
            Err(PathError::PathDidNotTerminate { .. })
        ));

        let grid = DirectionGrid::from_codes(vec![vec![5, 9, 9], vec![3, 8, 9]]).unwrap();
        assert_eq!(verify(&grid), Err(PathError::Revisit { row: 0, col: 0 }));
    }

    #[test]
    fn test_verify_reports_incomplete_and_wrong_terminal() {
        let grid = DirectionGrid::from_codes(vec![vec![5, 5], vec![3, 9]]).unwrap();
        assert_eq!(
            verify(&grid),
            Err(PathError::Incomplete {
                visited: 3,
                total: 4
            })
        );

        let grid = DirectionGrid::from_codes(vec![vec![3, 9], vec![9, 9]]).unwrap();
        assert_eq!(
            verify(&grid),
            Err(PathError::WrongTerminal { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_trace_length() {
        let grid = build(50, 100).unwrap();
        let cells = trace(&grid).unwrap();
        assert_eq!(cells.len(), 5000);
        assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
        assert_eq!(cells.last(), Some(&Cell::new(99, 49)));
    }

    proptest! {
        #[test]
        fn built_grids_are_hamiltonian(width in 2usize..64, height in 2usize..64) {
            let grid = build(width, height).unwrap();
            let cells = trace(&grid).unwrap();

            // W*H cells means exactly W*H - 1 steps.
            prop_assert_eq!(cells.len(), width * height);
            prop_assert_eq!(*cells.last().unwrap(), Cell::new(height - 1, width - 1));
            prop_assert!(verify(&grid).is_ok());
        }

        #[test]
        fn moves_match_direction_changes(width in 2usize..40, height in 2usize..40) {
            let grid = build(width, height).unwrap();
            let toolpath = emit(&grid, 0.0).unwrap();
            let cells = trace(&grid).unwrap();

            let codes: Vec<Direction> = cells.iter().filter_map(|&c| grid.at(c)).collect();
            let changes = codes.windows(2).filter(|w| w[0] != w[1]).count();

            prop_assert_eq!(toolpath.linear_moves().count(), changes);
            prop_assert!(toolpath.linear_moves().count() <= width * height);
            prop_assert_eq!(toolpath.end(), Some(Cell::new(height - 1, width - 1)));
        }
    }
}
