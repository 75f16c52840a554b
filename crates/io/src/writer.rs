//! NetCDF writer configuration and orchestration.

use std::path::Path;

use chrono::NaiveDateTime;
use isobar_evaluate::ClimatologyTable;
use isobar_grid::GriddedField;
use tracing::info;

use crate::error::IoError;

/// Configuration for writing gridded fields to NetCDF.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Name of the data variable.
    var_name: String,
    /// Optional `units` attribute of the data variable.
    units: Option<String>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            var_name: "z".into(),
            units: None,
        }
    }
}

impl WriterConfig {
    /// Sets the data variable name.
    pub fn with_var_name(mut self, name: impl Into<String>) -> Self {
        self.var_name = name.into();
        self
    }

    /// Sets the `units` attribute of the data variable.
    pub fn with_units(mut self, units: Option<impl Into<String>>) -> Self {
        self.units = units.map(Into::into);
        self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the variable name is empty or
    /// collides with a coordinate name.
    fn validate(&self) -> Result<(), IoError> {
        let reserved = ["time", "lat", "lon", "dayofyear", "n_samples"];
        if self.var_name.is_empty() || reserved.contains(&self.var_name.as_str()) {
            return Err(IoError::Validation {
                count: 1,
                details: format!("invalid data variable name '{}'", self.var_name),
            });
        }
        Ok(())
    }
}

/// Write a gridded field to a new NetCDF file.
///
/// Time is stored as hours since midnight of the first timestamp's date,
/// on the proleptic Gregorian calendar.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid or the
/// field has an empty axis, and [`IoError::Netcdf`] if the file cannot be
/// written.
pub fn write_netcdf(
    field: &GriddedField,
    path: &Path,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let (nt, ny, nx) = field.shape();
    if field.is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: format!("cannot write a field of shape ({nt}, {ny}, {nx})"),
        });
    }

    let base = field.times()[0].date().and_time(chrono::NaiveTime::MIN);
    let offsets = hours_since(base, field.times());

    let mut file = netcdf::create(path)?;
    file.add_dimension("time", nt)?;
    add_grid(&mut file, field.lats(), field.lons())?;
    {
        let mut var = file.add_variable::<f64>("time", &["time"])?;
        var.put_values(&offsets, ..)?;
        var.put_attribute(
            "units",
            format!("hours since {}", base.format("%Y-%m-%d %H:%M:%S")).as_str(),
        )?;
        var.put_attribute("calendar", "proleptic_gregorian")?;
    }
    {
        let data: Vec<f64> = field.values().iter().copied().collect();
        let mut var = file.add_variable::<f64>(&config.var_name, &["time", "lat", "lon"])?;
        if let Some(units) = &config.units {
            var.put_attribute("units", units.as_str())?;
        }
        var.put_values(&data, ..)?;
    }

    info!(path = %path.display(), n_times = nt, "wrote gridded field");
    Ok(())
}

/// Write a day-of-year climatology table to a new NetCDF file.
///
/// Entries are stored along a `dayofyear` dimension in ascending order,
/// together with the number of training entries behind each mean and the
/// leap-day policy as a global attribute.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid or the
/// table is empty, and [`IoError::Netcdf`] if the file cannot be written.
pub fn write_climatology(
    table: &ClimatologyTable,
    path: &Path,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    if table.is_empty() || table.lats().is_empty() || table.lons().is_empty() {
        return Err(IoError::Validation {
            count: 1,
            details: "cannot write an empty climatology table".to_string(),
        });
    }

    let mut days = Vec::with_capacity(table.len());
    let mut counts = Vec::with_capacity(table.len());
    let mut data = Vec::with_capacity(table.len() * table.lats().len() * table.lons().len());
    for (doy, mean) in table.iter() {
        days.push(i32::from(doy.get()));
        counts.push(i32::try_from(table.count(doy)).unwrap_or(i32::MAX));
        data.extend(mean.iter().copied());
    }

    let mut file = netcdf::create(path)?;
    file.add_attribute("leap_day_policy", table.policy().to_string().as_str())?;
    file.add_dimension("dayofyear", days.len())?;
    add_grid(&mut file, table.lats(), table.lons())?;
    {
        let mut var = file.add_variable::<i32>("dayofyear", &["dayofyear"])?;
        var.put_values(&days, ..)?;
    }
    {
        let mut var = file.add_variable::<i32>("n_samples", &["dayofyear"])?;
        var.put_values(&counts, ..)?;
    }
    {
        let mut var = file.add_variable::<f64>(&config.var_name, &["dayofyear", "lat", "lon"])?;
        if let Some(units) = &config.units {
            var.put_attribute("units", units.as_str())?;
        }
        var.put_values(&data, ..)?;
    }

    info!(path = %path.display(), n_days = days.len(), "wrote climatology table");
    Ok(())
}

fn add_grid(file: &mut netcdf::FileMut, lats: &[f64], lons: &[f64]) -> Result<(), IoError> {
    file.add_dimension("lat", lats.len())?;
    file.add_dimension("lon", lons.len())?;
    for (name, values, units) in [("lat", lats, "degrees_north"), ("lon", lons, "degrees_east")] {
        let mut var = file.add_variable::<f64>(name, &[name])?;
        var.put_values(values, ..)?;
        var.put_attribute("units", units)?;
    }
    Ok(())
}

fn hours_since(base: NaiveDateTime, times: &[NaiveDateTime]) -> Vec<f64> {
    times
        .iter()
        .map(|t| (*t - base).num_seconds() as f64 / 3600.0)
        .collect()
}
