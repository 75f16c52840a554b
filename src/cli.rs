use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Isobar gridded forecast evaluation.
#[derive(Parser)]
#[command(
    name = "isobar",
    version,
    about = "Latitude-weighted forecast scores and naive baselines for gridded fields"
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
    /// Score persistence and climatology baselines on the test years.
    Baselines(BaselinesArgs),
    /// Score an external forecast file against observations.
    Score(ScoreArgs),
    /// Write normalized training pairs and the climatology table.
    Prepare(PrepareArgs),
}

/// Arguments for the `baselines` subcommand.
#[derive(clap::Args)]
pub struct BaselinesArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "isobar.toml")]
    pub config: PathBuf,

    /// Path for the JSON report (printed to stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the lead in time steps from config.
    #[arg(short, long)]
    pub lead: Option<usize>,
}

/// Arguments for the `score` subcommand.
#[derive(clap::Args)]
pub struct ScoreArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "isobar.toml")]
    pub config: PathBuf,

    /// NetCDF forecast on the observation grid.
    #[arg(short, long)]
    pub forecast: PathBuf,

    /// Include the RMSE of every time step in the output.
    #[arg(long)]
    pub per_step: bool,

    /// `normalization.json` written by `prepare`; the forecast is
    /// de-normalized with it before scoring.
    #[arg(short, long)]
    pub normalization: Option<PathBuf>,

    /// Path for the JSON score (printed to stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `prepare` subcommand.
#[derive(clap::Args)]
pub struct PrepareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "isobar.toml")]
    pub config: PathBuf,

    /// Override the output directory from config.
    #[arg(long = "out-dir")]
    pub out_dir: Option<PathBuf>,
}
