//! Shared loading steps of the subcommands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use isobar_grid::{GriddedField, Normalizer};
use isobar_io::read_netcdf_many;
use tracing::info;

use crate::config::IsobarConfig;
use crate::convert;

/// Read and parse the TOML configuration file.
pub fn load_config(path: &Path) -> Result<IsobarConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Read every `[io].inputs` file into one observation field.
pub fn read_observations(config: &IsobarConfig) -> Result<GriddedField> {
    if config.io.inputs.is_empty() {
        bail!("no input files: set [io].inputs in config");
    }
    let reader_cfg = convert::build_reader_config(&config.io)?;

    info!(n_files = config.io.inputs.len(), "reading observations");
    let field = read_netcdf_many(&config.io.inputs, &reader_cfg)
        .context("failed to read observations")?;
    info!(
        n_times = field.n_times(),
        n_lats = field.n_lats(),
        n_lons = field.n_lons(),
        "observations loaded"
    );
    Ok(field)
}

/// Read the normalization statistics written by `prepare`.
pub fn load_normalizer(path: &Path) -> Result<Normalizer> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read normalization file: {}", path.display()))?;
    let parsed: Normalizer =
        serde_json::from_str(&json).context("failed to parse normalization JSON")?;
    Normalizer::new(parsed.mean(), parsed.std())
        .with_context(|| format!("invalid normalization in {}", path.display()))
}

/// Write `contents` to `output`, or print it to stdout.
pub fn emit(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{contents}"),
    }
    Ok(())
}
