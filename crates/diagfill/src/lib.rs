#![warn(missing_docs)]

//! Zigzag toolpath generation for layer-by-layer printing.
//!
//! This crate assigns a direction to every cell of a rectangular grid so that
//! following the directions from the top-left cell visits every cell exactly
//! once and ends at the bottom-right cell. The resulting path is turned into
//! a sequence of straight move instructions.
//!
//! # Example
//!
//! ```
//! use diagfill::{generate, JobSettings};
//!
//! let result = generate(&JobSettings::default()).unwrap();
//! assert_eq!(result.stats.cells, 30);
//! assert_eq!(result.toolpath.moves[0].x, 0);
//! ```

pub mod builder;
pub mod direction;
pub mod emit;
pub mod error;
pub mod grid;

pub use builder::build;
pub use direction::Direction;
pub use emit::{emit, trace, verify, MoveInstruction, MoveKind, Toolpath};
pub use error::{PathError, Result};
pub use grid::{Cell, DirectionGrid, MIN_DIMENSION};

use serde::{Deserialize, Serialize};

/// Grid size and layer height for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSettings {
    /// Number of grid columns.
    pub width: usize,
    /// Number of grid rows.
    pub height: usize,
    /// Constant Z height of every move.
    pub layer_height: f64,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            width: 6,
            height: 5,
            layer_height: 0.0,
        }
    }
}

impl JobSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(PathError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        validate_layer_height(self.layer_height)
    }
}

/// Check that `layer_height` is a finite, non-negative Z value.
pub fn validate_layer_height(layer_height: f64) -> Result<()> {
    if !layer_height.is_finite() || layer_height < 0.0 {
        return Err(PathError::InvalidSettings(
            "layer_height must be a non-negative number".into(),
        ));
    }
    Ok(())
}

/// Statistics about a generated path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStats {
    /// Number of grid cells.
    pub cells: usize,
    /// Number of single-cell steps along the path.
    pub steps: usize,
    /// Number of printing moves after coalescing straight runs.
    pub moves: usize,
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Direction grid the toolpath was derived from.
    pub grid: DirectionGrid,
    /// Move instructions.
    pub toolpath: Toolpath,
    /// Path statistics.
    pub stats: PathStats,
}

/// Build the grid for `settings` and emit its toolpath.
///
/// This is the main entry point. It:
/// 1. Validates the settings
/// 2. Builds the direction grid
/// 3. Emits the move instructions
pub fn generate(settings: &JobSettings) -> Result<PathResult> {
    settings.validate()?;

    let grid = build(settings.width, settings.height)?;
    let toolpath = emit(&grid, settings.layer_height)?;

    let stats = PathStats {
        cells: grid.len(),
        steps: grid.len() - 1,
        moves: toolpath.linear_moves().count(),
    };

    Ok(PathResult {
        grid,
        toolpath,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default() {
        let result = generate(&JobSettings::default()).unwrap();
        assert_eq!(result.stats.cells, 30);
        assert_eq!(result.stats.steps, 29);
        assert_eq!(result.stats.moves, 17);
        assert_eq!(result.toolpath.end(), Some(Cell::new(4, 5)));
    }

    #[test]
    fn test_generate_large() {
        let settings = JobSettings {
            width: 50,
            height: 100,
            layer_height: 0.2,
        };
        let result = generate(&settings).unwrap();
        assert_eq!(result.stats.cells, 5000);
        assert!(result.stats.moves <= result.stats.cells);
        verify(&result.grid).unwrap();
    }

    #[test]
    fn test_invalid_settings() {
        let settings = JobSettings {
            width: 1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = JobSettings {
            layer_height: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            generate(&settings),
            Err(PathError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_validate_layer_height() {
        assert!(validate_layer_height(0.0).is_ok());
        assert!(validate_layer_height(0.2).is_ok());
        for z in [f64::NAN, f64::INFINITY, -3.0] {
            assert!(
                matches!(validate_layer_height(z), Err(PathError::InvalidSettings(_))),
                "{z}"
            );
        }
    }

    #[test]
    fn test_settings_from_partial_toml() {
        let settings: JobSettings = toml::from_str("width = 8\n").unwrap();
        assert_eq!(settings.width, 8);
        assert_eq!(settings.height, 5);
        assert_eq!(settings.layer_height, 0.0);
    }
}
