use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Shear-wave splitting measurement by the eigenvalue method.
#[derive(Parser)]
#[command(
    name = "splitwave",
    version,
    about = "Shear-wave splitting measurement by the Silver & Chan eigenvalue method"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Measure splitting parameters of a two-component record.
    Measure(MeasureArgs),
    /// Write a synthetic split shear wave.
    Synth(SynthArgs),
}

/// Arguments for the `measure` subcommand.
#[derive(clap::Args)]
pub struct MeasureArgs {
    /// Two-column whitespace-separated text file (`#` starts a comment).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Largest lag searched, in samples (exclusive). Overrides the config.
    #[arg(short, long = "max-shift")]
    pub max_shift: Option<usize>,

    /// Sample interval. Overrides the config.
    #[arg(short, long)]
    pub delta: Option<f64>,

    /// Angular step in degrees. Overrides the config.
    #[arg(long = "step-angle")]
    pub step_angle: Option<f64>,

    /// Lag step in samples. Overrides the config.
    #[arg(long = "step-shift")]
    pub step_shift: Option<usize>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path for the JSON summary (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include the full eigenvalue surface in the summary.
    #[arg(long)]
    pub surface: bool,
}

/// Arguments for the `synth` subcommand.
#[derive(clap::Args)]
pub struct SynthArgs {
    /// Fast direction in degrees.
    #[arg(short, long, allow_negative_numbers = true)]
    pub fast: f64,

    /// Splitting delay in samples.
    #[arg(short, long)]
    pub lag: usize,

    /// Source polarization in degrees. Overrides the config.
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    pub srcpol: Option<f64>,

    /// Noise level relative to the peak amplitude. Overrides the config.
    #[arg(short, long)]
    pub noise: Option<f64>,

    /// Output length in samples. Overrides the config.
    #[arg(long)]
    pub samples: Option<usize>,

    /// Ricker width in samples. Overrides the config.
    #[arg(short, long)]
    pub width: Option<f64>,

    /// Sample interval. Overrides the config.
    #[arg(short, long)]
    pub delta: Option<f64>,

    /// Noise RNG seed. Overrides the config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path for the two-column output file.
    #[arg(short, long)]
    pub output: PathBuf,
}
