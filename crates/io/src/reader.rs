//! High-level NetCDF reader configuration and orchestration.

use std::path::Path;

use isobar_grid::{GriddedField, concat_time};
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// ReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a gridded field from NetCDF files.
///
/// Use the builder methods (`with_*`) to customise the variable name,
/// coordinate aliases, and time subsampling. The [`Default`] implementation
/// matches ERA5-style geopotential files: variable `z` on dimensions
/// `(time, lat, lon)` with CF time units.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// NetCDF variable holding the field.
    var_name: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Keep every n-th time entry.
    time_stride: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            var_name: "z".into(),
            lat_aliases: vec!["lat".into(), "latitude".into()],
            lon_aliases: vec!["lon".into(), "longitude".into()],
            time_var: "time".into(),
            time_stride: 1,
        }
    }
}

impl ReaderConfig {
    /// Set the field variable name.
    pub fn with_var_name(mut self, name: impl Into<String>) -> Self {
        self.var_name = name.into();
        self
    }

    /// Set the time coordinate variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Replace the latitude aliases.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Replace the longitude aliases.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Keep every `stride`-th time entry, starting with the first.
    ///
    /// A stride of 12 turns an hourly file into a 12-hourly field.
    pub fn with_time_stride(mut self, stride: usize) -> Self {
        self.time_stride = stride;
        self
    }

    /// Returns the field variable name.
    pub fn var_name(&self) -> &str {
        &self.var_name
    }

    /// Returns the time stride.
    pub fn time_stride(&self) -> usize {
        self.time_stride
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem found.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.time_stride == 0 {
            problems.push("time_stride must be at least 1".to_string());
        }
        if self.var_name.is_empty() {
            problems.push("var_name must not be empty".to_string());
        }
        if self.lat_aliases.is_empty() || self.lon_aliases.is_empty() {
            problems.push("latitude and longitude need at least one alias each".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// read_netcdf
// ---------------------------------------------------------------------------

/// Read a gridded field from a NetCDF file.
///
/// The configured variable must be 3-D with dimensions ordered
/// `(time, lat, lon)`, matching the lengths of the time, latitude and
/// longitude coordinate variables.
///
/// # Errors
///
/// Returns [`IoError`] on missing files or variables, dimension mismatches,
/// undecodable time axes, missing values, or time axes that are not
/// strictly increasing.
pub fn read_netcdf(path: &Path, config: &ReaderConfig) -> Result<GriddedField, IoError> {
    config.validate()?;

    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();

    let (lat_name, lats) = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;
    let (lon_name, lons) = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;
    let times = netcdf_read::read_time_axis(&file, &config.time_var, path)?;

    // -- 3-D data -----------------------------------------------------------

    let (data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, &config.var_name, path)?;
    for (name, expected, got) in [
        (config.time_var.as_str(), times.len(), nt),
        (lat_name.as_str(), lats.len(), ny),
        (lon_name.as_str(), lons.len(), nx),
    ] {
        if expected != got {
            return Err(IoError::DimensionMismatch {
                name: name.to_string(),
                expected,
                got,
            });
        }
    }

    let field = GriddedField::from_flat(times, lats, lons, data)?;

    // -- Subsample ----------------------------------------------------------

    let field = if config.time_stride > 1 {
        let keep: Vec<usize> = (0..nt).step_by(config.time_stride).collect();
        debug!(stride = config.time_stride, kept = keep.len(), "subsampling time axis");
        field.select_indices(&keep)?
    } else {
        field
    };

    info!(
        path = %path.display(),
        var = %config.var_name,
        n_times = field.n_times(),
        n_lats = field.n_lats(),
        n_lons = field.n_lons(),
        "read gridded field"
    );

    Ok(field)
}

/// Read several NetCDF files (e.g. one per year) and concatenate them along
/// time.
///
/// Files may be given in any order; they are ordered by their first
/// timestamp. All files must share the same grid and must not overlap in
/// time.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if `paths` is empty, any error of
/// [`read_netcdf`], or [`IoError::Grid`] if the files cannot be joined.
pub fn read_netcdf_many<P: AsRef<Path>>(
    paths: &[P],
    config: &ReaderConfig,
) -> Result<GriddedField, IoError> {
    if paths.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "no input files given".to_string(),
        });
    }

    let fields = paths
        .iter()
        .map(|p| read_netcdf(p.as_ref(), config))
        .collect::<Result<Vec<_>, _>>()?;
    let field = concat_time(fields)?;

    info!(
        n_files = paths.len(),
        n_times = field.n_times(),
        "concatenated input files"
    );
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ReaderConfig::default();
        assert_eq!(config.var_name(), "z");
        assert_eq!(config.time_stride(), 1);
        assert_eq!(config.lat_aliases, vec!["lat", "latitude"]);
        assert_eq!(config.lon_aliases, vec!["lon", "longitude"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = ReaderConfig::default()
            .with_var_name("geopotential")
            .with_time_var("valid_time")
            .with_time_stride(12);
        assert_eq!(config.var_name(), "geopotential");
        assert_eq!(config.time_var, "valid_time");
        assert_eq!(config.time_stride(), 12);
    }

    #[test]
    fn validate_collects_problems() {
        let config = ReaderConfig::default()
            .with_time_stride(0)
            .with_var_name("");
        match config.validate().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("time_stride"));
                assert!(details.contains("var_name"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file() {
        let err = read_netcdf(Path::new("/nonexistent/z500.nc"), &ReaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn many_requires_input() {
        let paths: [&Path; 0] = [];
        assert!(matches!(
            read_netcdf_many(&paths, &ReaderConfig::default()),
            Err(IoError::Validation { .. })
        ));
    }
}
