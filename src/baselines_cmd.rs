//! Baselines command: score persistence and climatology on the test years.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use isobar_evaluate::{evaluate_baselines, to_json};

use crate::cli::BaselinesArgs;
use crate::convert;
use crate::input;

/// Run the baseline evaluation.
pub fn run(args: BaselinesArgs) -> Result<()> {
    let _cmd = info_span!("baselines").entered();

    // 1. Load project TOML
    let config = input::load_config(&args.config)?;
    let split = convert::build_split(&config.split)?;
    let eval_cfg = convert::build_evaluate_config(&config.evaluate, args.lead)?;

    // 2. Read observations and split by year
    let observed = input::read_observations(&config)?;
    let train = observed.slice_years(split.train());
    let test = observed.slice_years(split.test());
    info!(
        train = %split.train(),
        test = %split.test(),
        n_train = train.n_times(),
        n_test = test.n_times(),
        "split observations"
    );
    if train.n_times() == 0 || test.n_times() == 0 {
        bail!(
            "observations do not cover both the training ({}) and test ({}) years",
            split.train(),
            split.test()
        );
    }

    // 3. Score baselines
    let report =
        evaluate_baselines(&train, &test, &eval_cfg).context("baseline evaluation failed")?;

    // 4. Write JSON
    let json = to_json(&report)?;
    input::emit(&json, args.output.as_deref())
}
