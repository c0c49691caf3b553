#![warn(missing_docs)]

//! G-code generation for diagfill toolpaths.
//!
//! This crate renders the move instructions produced by [`diagfill::emit`]
//! as G-code text: one `G0` line to the origin followed by one `G1` line per
//! printing move. Coordinates are grid indices; scaling to physical units is
//! left to the consumer.
//!
//! # Example
//!
//! ```
//! use diagfill::{build, emit};
//! use diagfill_gcode::{generate_gcode, GcodeSettings};
//!
//! let grid = build(6, 5).unwrap();
//! let toolpath = emit(&grid, 0.0).unwrap();
//! let gcode = generate_gcode(&toolpath, &GcodeSettings::default());
//! assert!(gcode.starts_with("G0 X0 Y0 Z0\nG1 X0 Y1 Z0\n"));
//! ```

pub mod error;
pub mod gcode;

pub use error::{GcodeError, Result};
pub use gcode::{format_z, generate_gcode, GcodeGenerator, GcodeSettings};
