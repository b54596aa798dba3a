//! lasersvg command-line tool

use anyhow::Context;
use clap::{Parser, Subcommand};
use lasersvg::{
    init_logging, load_config, materialize_str, parse_slit_input, remove_short_segments, reverse,
    tag_slits, Config, Contour, SegmentClassifier, SlitOptions,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lasersvg")]
#[command(about = "Thickness-parametric path data for laser-cut designs")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON or TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite thickness-length segments as expressions in `thickness`
    Tag {
        /// Path data; read from stdin when omitted
        path: Option<String>,

        /// Thickness the drawing was made for
        #[arg(short, long)]
        thickness: Option<f64>,

        /// Length-matching tolerance
        #[arg(long)]
        tolerance: Option<f64>,

        /// Tag exactly these command indices instead of matching lengths
        #[arg(short, long, value_delimiter = ',')]
        indices: Vec<usize>,
    },

    /// Tag slit bases and correct their walls and outer segments
    Slits {
        /// Path data or template; read from stdin when omitted
        path: Option<String>,

        /// Command indices of the slit bases
        #[arg(short, long, value_delimiter = ',', required = true)]
        indices: Vec<usize>,

        /// Thickness the drawing was made for
        #[arg(short, long)]
        thickness: Option<f64>,

        /// Keep walls next to outer segments parallel to the base
        #[arg(long)]
        assume_parallel: bool,
    },

    /// Evaluate a template at a thickness
    Materialize {
        /// Template; read from stdin when omitted
        path: Option<String>,

        /// Thickness to evaluate at
        #[arg(short, long)]
        thickness: Option<f64>,
    },

    /// List segments whose length matches the thickness, as JSON
    Candidates {
        /// Path data; read from stdin when omitted
        path: Option<String>,

        /// Thickness the drawing was made for
        #[arg(short, long)]
        thickness: Option<f64>,

        /// Length-matching tolerance
        #[arg(long)]
        tolerance: Option<f64>,
    },

    /// Remove zero-length and near-zero-length segments
    Clean {
        /// Path data; read from stdin when omitted
        path: Option<String>,

        /// Largest length that is removed
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Reverse the drawing direction of a contour
    Reverse {
        /// Path data; read from stdin when omitted
        path: Option<String>,
    },

    /// Convert absolute path data to relative commands
    Relative {
        /// Path data; read from stdin when omitted
        path: Option<String>,
    },
}

fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path {
        Some(path) => Ok(path),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read path data from stdin")?;
            Ok(buffer.trim().to_string())
        }
    }
}

fn parse_contour(path: Option<String>) -> anyhow::Result<Contour> {
    let text = read_input(path)?;
    text.parse::<Contour>()
        .with_context(|| format!("Invalid path data '{}'", text))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config: Config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Tag {
            path,
            thickness,
            tolerance,
            indices,
        } => {
            if let Some(tolerance) = tolerance {
                config.tagging.tolerance = tolerance;
            }
            let thickness = thickness.unwrap_or(config.material.thickness);
            let contour = parse_contour(path)?;
            let classifier = SegmentClassifier::new(thickness, config.tag_options())?;
            let template = if indices.is_empty() {
                classifier.tag_all(&contour)
            } else {
                classifier.tag_selected(&contour, &indices)
            };
            println!("{}", template);
        }
        Commands::Slits {
            path,
            indices,
            thickness,
            assume_parallel,
        } => {
            let thickness = thickness.unwrap_or(config.material.thickness);
            let text = read_input(path)?;
            let template = parse_slit_input(&text)
                .with_context(|| format!("Invalid path data or template '{}'", text))?;
            let options = SlitOptions {
                assume_parallel: assume_parallel || config.slits.assume_parallel,
                ..config.slit_options()
            };
            let outcome = tag_slits(&template, &indices, thickness, options)?;
            if !outcome.issues.is_empty() {
                warn!(count = outcome.issues.len(), "some slit sides were not corrected");
            }
            println!("{}", outcome.template);
        }
        Commands::Materialize { path, thickness } => {
            let thickness = thickness.unwrap_or(config.material.thickness);
            let text = read_input(path)?;
            println!("{}", materialize_str(&text, thickness)?);
        }
        Commands::Candidates {
            path,
            thickness,
            tolerance,
        } => {
            let thickness = thickness.unwrap_or(config.material.thickness);
            let tolerance = tolerance.unwrap_or(config.tagging.tolerance);
            let contour = parse_contour(path)?;
            let found = lasersvg::candidates(&contour, thickness, tolerance)?;
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Clean { path, threshold } => {
            let threshold = threshold.unwrap_or(config.cleanup.threshold);
            let contour = parse_contour(path)?;
            let report = remove_short_segments(&contour, threshold);
            info!(removed = report.removed, "cleanup finished");
            println!("{}", report.contour);
        }
        Commands::Reverse { path } => {
            let contour = parse_contour(path)?;
            println!("{}", reverse(&contour)?);
        }
        Commands::Relative { path } => {
            println!("{}", parse_contour(path)?);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    run(Cli::parse())
}
