//! Job settings from a TOML file and command-line overrides.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use diagfill::JobSettings;

/// Grid size options shared by the subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Number of grid columns
    #[arg(short = 'W', long)]
    pub width: Option<usize>,
    /// Number of grid rows
    #[arg(short = 'H', long)]
    pub height: Option<usize>,
    /// Layer height written as Z on every move
    #[arg(short = 'z', long)]
    pub layer_height: Option<f64>,
    /// TOML file with `width`, `height` and `layer_height`
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl JobArgs {
    /// Settings from the config file (or defaults) with flags applied on top.
    pub fn resolve(&self) -> Result<JobSettings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => JobSettings::default(),
        };

        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(layer_height) = self.layer_height {
            settings.layer_height = layer_height;
        }

        settings.validate()?;
        debug!(?settings, "resolved job settings");
        Ok(settings)
    }
}

fn load_settings(path: &Path) -> Result<JobSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let settings: JobSettings =
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = JobArgs::default().resolve().unwrap();
        assert_eq!(settings, JobSettings::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 50\nheight = 100\nlayer_height = 0.2").unwrap();

        let args = JobArgs {
            height: Some(7),
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let settings = args.resolve().unwrap();
        assert_eq!(settings.width, 50);
        assert_eq!(settings.height, 7);
        assert_eq!(settings.layer_height, 0.2);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let args = JobArgs {
            width: Some(1),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_missing_config() {
        let args = JobArgs {
            config: Some(PathBuf::from("/nonexistent/diagfill.toml")),
            ..Default::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
