//! Prepare command: normalized lead pairs for an external model trainer.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span};

use isobar_evaluate::ClimatologyTable;
use isobar_grid::{GriddedField, Normalizer, lead_pairs};
use isobar_io::{WriterConfig, write_climatology, write_netcdf};

use crate::cli::PrepareArgs;
use crate::convert;
use crate::input;

/// Contents of `normalization.json`.
#[derive(Serialize)]
struct NormalizationRecord<'a> {
    var_name: &'a str,
    train_years: String,
    lead_steps: usize,
    #[serde(flatten)]
    normalizer: Normalizer,
}

/// Write `{split}_x.nc`, `{split}_y.nc`, `normalization.json` and
/// optionally `climatology.nc` into the output directory.
pub fn run(args: PrepareArgs) -> Result<()> {
    let _cmd = info_span!("prepare").entered();

    // 1. Load project TOML
    let config = input::load_config(&args.config)?;
    let split = convert::build_split(&config.split)?;
    let eval_cfg = convert::build_evaluate_config(&config.evaluate, None)?;
    let Some(out_dir) = args.out_dir.or_else(|| config.prepare.out_dir.clone()) else {
        bail!("no output directory: set [prepare].out_dir in config or use --out-dir");
    };
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    // 2. Read observations and fit the normalizer on training years only
    let observed = input::read_observations(&config)?;
    let train = observed.slice_years(split.train());
    let normalizer = Normalizer::fit(&train)
        .with_context(|| format!("cannot normalize training years {}", split.train()))?;
    info!(mean = normalizer.mean(), std = normalizer.std(), "fitted normalizer");

    // 3. Normalized (X, Y) pairs per split
    let lead = eval_cfg.lead_steps();
    let pair_writer = WriterConfig::default().with_var_name(&config.io.var_name);
    for (name, years) in [
        ("train", split.train()),
        ("validation", split.validation()),
        ("test", split.test()),
    ] {
        let part = normalizer.apply(&observed.slice_years(years));
        write_pairs(&part, name, lead, &out_dir, &pair_writer)
            .with_context(|| format!("failed to prepare {name} years {years}"))?;
    }

    // 4. Normalization statistics
    let record = NormalizationRecord {
        var_name: &config.io.var_name,
        train_years: split.train().to_string(),
        lead_steps: lead,
        normalizer,
    };
    let json =
        serde_json::to_string_pretty(&record).context("failed to serialize normalization")?;
    input::emit(&json, Some(out_dir.join("normalization.json").as_path()))?;

    // 5. Climatology table on the original scale
    if config.prepare.write_climatology {
        let table =
            ClimatologyTable::build(&train, &eval_cfg).context("failed to build climatology")?;
        let path = out_dir.join("climatology.nc");
        write_climatology(&table, &path, &convert::build_writer_config(&config.io))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(path = %out_dir.display(), "training data prepared");
    Ok(())
}

fn write_pairs(
    field: &GriddedField,
    name: &str,
    lead: usize,
    out_dir: &Path,
    writer: &WriterConfig,
) -> Result<()> {
    let (x, y) = lead_pairs(field, lead)?;
    for (suffix, part) in [("x", &x), ("y", &y)] {
        let path = out_dir.join(format!("{name}_{suffix}.nc"));
        write_netcdf(part, &path, writer)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    info!(split = name, n_pairs = x.n_times(), "wrote lead pairs");
    Ok(())
}
