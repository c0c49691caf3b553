//! diagfill CLI - zigzag grid toolpaths as G-code
//!
//! Builds the direction grid for a width x height job, walks it, and writes
//! the resulting moves as G-code.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use diagfill::{DirectionGrid, Toolpath};
use diagfill_gcode::{GcodeGenerator, GcodeSettings};

mod config;
mod logging;

use config::JobArgs;

#[derive(Parser)]
#[command(name = "diagfill")]
#[command(about = "Zigzag grid toolpaths as G-code", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a grid and write its G-code
    Gcode {
        #[command(flatten)]
        job: JobArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write a `; diagfill WxH` comment first
        #[arg(long)]
        header: bool,
    },
    /// Print the direction grid
    Grid {
        #[command(flatten)]
        job: JobArgs,
        /// Dump format
        #[arg(short, long, value_enum, default_value_t = GridFormat::Codes)]
        format: GridFormat,
    },
    /// Check that a grid visits every cell exactly once
    Verify {
        #[command(flatten)]
        job: JobArgs,
        /// JSON grid file to check instead of building one
        #[arg(long)]
        grid: Option<PathBuf>,
    },
    /// Write G-code for a grid loaded from a JSON file
    Emit {
        /// JSON grid file (rows of direction codes 1-9)
        #[arg(long)]
        grid: PathBuf,
        /// Layer height
        #[arg(short = 'z', long, default_value_t = 0.0)]
        layer_height: f64,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GridFormat {
    /// Numeric direction codes
    Codes,
    /// Arrow glyphs
    Arrows,
    /// JSON rows of codes
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Gcode {
            job,
            output,
            header,
        }) => {
            write_gcode_for_job(&job, output.as_deref(), header)?;
        }
        Some(Commands::Grid { job, format }) => {
            print_grid(&job, format)?;
        }
        Some(Commands::Verify { job, grid }) => {
            verify_grid(&job, grid.as_deref())?;
        }
        Some(Commands::Emit {
            grid,
            layer_height,
            output,
        }) => {
            emit_from_file(&grid, layer_height, output.as_deref())?;
        }
        None => {
            // Default job to stdout
            write_gcode_for_job(&JobArgs::default(), None, false)?;
        }
    }

    Ok(())
}

fn write_gcode_for_job(job: &JobArgs, output: Option<&Path>, header: bool) -> Result<()> {
    let settings = job.resolve()?;
    let result = diagfill::generate(&settings)?;
    info!(
        width = settings.width,
        height = settings.height,
        moves = result.stats.moves,
        "generated toolpath"
    );

    let gcode_settings = GcodeSettings {
        comment: header.then(|| format!("diagfill {}x{}", settings.width, settings.height)),
        ..Default::default()
    };
    write_toolpath(&result.toolpath, gcode_settings, output)
}

fn print_grid(job: &JobArgs, format: GridFormat) -> Result<()> {
    let settings = job.resolve()?;
    let grid = diagfill::build(settings.width, settings.height)?;

    match format {
        GridFormat::Codes => print!("{}", grid),
        GridFormat::Arrows => print!("{}", grid.render_arrows()),
        GridFormat::Json => println!("{}", serde_json::to_string_pretty(&grid.to_codes())?),
    }
    Ok(())
}

fn verify_grid(job: &JobArgs, grid_file: Option<&Path>) -> Result<()> {
    let grid = match grid_file {
        Some(path) => load_grid(path)?,
        None => {
            let settings = job.resolve()?;
            diagfill::build(settings.width, settings.height)?
        }
    };

    diagfill::verify(&grid).context("grid does not describe a single covering path")?;
    println!(
        "ok: {}x{} grid, {} cells, {} steps",
        grid.width(),
        grid.height(),
        grid.len(),
        grid.len() - 1
    );
    Ok(())
}

fn emit_from_file(grid_file: &Path, layer_height: f64, output: Option<&Path>) -> Result<()> {
    diagfill::validate_layer_height(layer_height)?;
    let grid = load_grid(grid_file)?;
    let toolpath = diagfill::emit(&grid, layer_height)
        .with_context(|| format!("failed to walk grid from {}", grid_file.display()))?;
    write_toolpath(&toolpath, GcodeSettings::default(), output)
}

fn load_grid(path: &Path) -> Result<DirectionGrid> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read grid file {}", path.display()))?;
    let grid: DirectionGrid = serde_json::from_str(&json)
        .with_context(|| format!("invalid grid file {}", path.display()))?;
    Ok(grid)
}

fn write_toolpath(toolpath: &Toolpath, settings: GcodeSettings, output: Option<&Path>) -> Result<()> {
    let generator = GcodeGenerator::new(settings);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            generator.write(toolpath, BufWriter::new(file))?;
            info!(path = %path.display(), "wrote gcode");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            generator.write(toolpath, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}
