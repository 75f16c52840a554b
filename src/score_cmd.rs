//! Score command: weighted RMSE of an external forecast.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use isobar_evaluate::{score_forecast, to_json};
use isobar_io::read_netcdf;

use crate::cli::ScoreArgs;
use crate::convert;
use crate::input;

/// Score a forecast file against the configured observations.
pub fn run(args: ScoreArgs) -> Result<()> {
    let _cmd = info_span!("score").entered();

    let config = input::load_config(&args.config)?;
    let observed = input::read_observations(&config)?;

    let reader_cfg = convert::build_reader_config(&config.io)?;
    let mut forecast = read_netcdf(&args.forecast, &reader_cfg)
        .with_context(|| format!("failed to read forecast: {}", args.forecast.display()))?;
    if let Some(path) = &args.normalization {
        let normalizer = input::load_normalizer(path)?;
        forecast = normalizer.invert(&forecast);
        info!(mean = normalizer.mean(), std = normalizer.std(), "de-normalized forecast");
    }

    let score = score_forecast(&forecast, &observed, args.per_step)
        .context("forecast does not match observations")?;
    info!(rmse = score.rmse, n_times = score.n_times, "forecast scored");

    let json = to_json(&score)?;
    input::emit(&json, args.output.as_deref())
}
