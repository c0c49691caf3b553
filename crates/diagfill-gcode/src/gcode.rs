//! Rendering toolpaths as G-code lines.

use std::io::Write;

use diagfill::{MoveInstruction, MoveKind, Toolpath};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Output options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeSettings {
    /// Comment written as the first line (`; <comment>`).
    pub comment: Option<String>,
    /// Fixed number of decimals for Z. `None` uses the shortest form (`0`, `0.2`).
    pub z_precision: Option<usize>,
}

/// Format a Z height.
pub fn format_z(z: f64, precision: Option<usize>) -> String {
    match precision {
        Some(prec) => format!("{:.prec$}", z, prec = prec),
        None => format!("{}", z),
    }
}

/// Renders toolpaths with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct GcodeGenerator {
    settings: GcodeSettings,
}

impl GcodeGenerator {
    /// Create a generator.
    pub fn new(settings: GcodeSettings) -> Self {
        Self { settings }
    }

    /// A single move as a G-code line, without the trailing newline.
    pub fn line(&self, mv: &MoveInstruction) -> String {
        let code = match mv.kind {
            MoveKind::Rapid => "G0",
            MoveKind::Linear => "G1",
        };
        format!(
            "{} X{} Y{} Z{}",
            code,
            mv.x,
            mv.y,
            format_z(mv.z, self.settings.z_precision)
        )
    }

    /// Every line of the program in order, comment first.
    fn lines<'a>(&'a self, toolpath: &'a Toolpath) -> impl Iterator<Item = String> + 'a {
        let comment = self.settings.comment.iter().map(|c| format!("; {}", c));
        comment.chain(toolpath.moves.iter().map(|mv| self.line(mv)))
    }

    /// Write the full program to `out`.
    pub fn write<W: Write>(&self, toolpath: &Toolpath, mut out: W) -> Result<()> {
        for line in self.lines(toolpath) {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        debug!(lines = toolpath.len(), "wrote gcode");
        Ok(())
    }

    /// Render the full program as a string.
    pub fn generate(&self, toolpath: &Toolpath) -> String {
        self.lines(toolpath).fold(String::new(), |mut output, line| {
            output.push_str(&line);
            output.push('\n');
            output
        })
    }
}

/// Render `toolpath` as G-code text.
pub fn generate_gcode(toolpath: &Toolpath, settings: &GcodeSettings) -> String {
    GcodeGenerator::new(settings.clone()).generate(toolpath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagfill::{build, emit, Cell};

    const SNAPSHOT_6X5: &str = "\
G0 X0 Y0 Z0
G1 X0 Y1 Z0
G1 X1 Y0 Z0
G1 X2 Y0 Z0
G1 X0 Y2 Z0
G1 X0 Y3 Z0
G1 X3 Y0 Z0
G1 X4 Y0 Z0
G1 X0 Y4 Z0
G1 X1 Y4 Z0
G1 X5 Y0 Z0
G1 X5 Y1 Z0
G1 X2 Y4 Z0
G1 X3 Y4 Z0
G1 X5 Y2 Z0
G1 X5 Y3 Z0
G1 X4 Y4 Z0
G1 X5 Y4 Z0
";

    #[test]
    fn test_format_z() {
        assert_eq!(format_z(0.0, None), "0");
        assert_eq!(format_z(0.2, None), "0.2");
        assert_eq!(format_z(0.2, Some(3)), "0.200");
    }

    #[test]
    fn test_line() {
        let generator = GcodeGenerator::default();
        assert_eq!(
            generator.line(&MoveInstruction::rapid(Cell::new(0, 0), 0.0)),
            "G0 X0 Y0 Z0"
        );
        // x is the column, y the row.
        assert_eq!(
            generator.line(&MoveInstruction::linear(Cell::new(4, 1), 0.3)),
            "G1 X1 Y4 Z0.3"
        );
    }

    #[test]
    fn test_snapshot_6x5() {
        let toolpath = emit(&build(6, 5).unwrap(), 0.0).unwrap();
        assert_eq!(generate_gcode(&toolpath, &GcodeSettings::default()), SNAPSHOT_6X5);
    }

    #[test]
    fn test_write_matches_generate() {
        let toolpath = emit(&build(7, 4).unwrap(), 0.25).unwrap();
        let settings = GcodeSettings {
            comment: Some("diagfill 7x4".into()),
            z_precision: Some(2),
        };
        let generator = GcodeGenerator::new(settings);

        let mut buf = Vec::new();
        generator.write(&toolpath, &mut buf).unwrap();
        let written = String::from_utf8(buf).unwrap();

        assert_eq!(written, generator.generate(&toolpath));
        assert!(written.starts_with("; diagfill 7x4\nG0 X0 Y0 Z0.25\n"));
        assert!(written.ends_with("G1 X6 Y3 Z0.25\n"));
        assert_eq!(written.lines().count(), toolpath.len() + 1);
    }

    #[test]
    fn test_no_comment_by_default() {
        let toolpath = emit(&build(2, 2).unwrap(), 0.0).unwrap();
        let generator = GcodeGenerator::default();

        let mut buf = Vec::new();
        generator.write(&toolpath, &mut buf).unwrap();
        let text = generator.generate(&toolpath);

        assert_eq!(String::from_utf8(buf).unwrap(), text);
        assert_eq!(text.lines().count(), toolpath.len());
        assert!(!text.contains(';'));
    }
}
