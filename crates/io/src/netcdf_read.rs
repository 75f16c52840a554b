//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use netcdf::AttributeValue;

use crate::error::IoError;

/// Calendars whose dates are ordinary proleptic Gregorian dates.
const GREGORIAN_CALENDARS: [&str; 3] = ["standard", "gregorian", "proleptic_gregorian"];

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the name of the alias that matched together with its data. If
/// none match, returns [`IoError::MissingVariable`] with the first alias as
/// the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<(String, Vec<f64>), IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok((alias.to_string(), var.get_values::<f64, _>(..)?));
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D variable as `f64` and return the flattened, unpacked data
/// together with the shape `[nt, ny, nx]` derived from its dimensions.
///
/// Packed variables are unpacked with their `scale_factor` and `add_offset`
/// attributes. Fields must be complete: any `_FillValue` or `missing_value`
/// entry, or any NaN, is rejected.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }
    let shape = [dims[0].len(), dims[1].len(), dims[2].len()];

    let mut data = var.get_values::<f64, _>(..)?;

    let fill_values: Vec<f64> = ["_FillValue", "missing_value"]
        .into_iter()
        .map(|attr| f64_attribute(&var, attr))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .flatten()
        .collect();
    let n_missing = data
        .iter()
        .filter(|&&v| v.is_nan() || fill_values.contains(&v))
        .count();
    if n_missing > 0 {
        return Err(IoError::Validation {
            count: n_missing,
            details: format!("'{var_name}' has missing values; gridded fields must be complete"),
        });
    }

    let scale = f64_attribute(&var, "scale_factor")?.unwrap_or(1.0);
    let offset = f64_attribute(&var, "add_offset")?.unwrap_or(0.0);
    if scale != 1.0 || offset != 0.0 {
        data.iter_mut().for_each(|v| *v = *v * scale + offset);
    }

    Ok((data, shape))
}

/// Read a numeric scalar attribute, if present.
fn f64_attribute(var: &netcdf::Variable<'_>, name: &str) -> Result<Option<f64>, IoError> {
    let Some(value) = var.attribute_value(name) else {
        return Ok(None);
    };
    let value = match value? {
        AttributeValue::Double(v) => v,
        AttributeValue::Float(v) => f64::from(v),
        AttributeValue::Int(v) => f64::from(v),
        AttributeValue::Short(v) => f64::from(v),
        AttributeValue::Doubles(v) if v.len() == 1 => v[0],
        AttributeValue::Floats(v) if v.len() == 1 => f64::from(v[0]),
        other => {
            return Err(IoError::Validation {
                count: 1,
                details: format!("attribute '{name}' is not a numeric scalar: {other:?}"),
            });
        }
    };
    Ok(Some(value))
}

/// Read a string attribute, if present.
fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Result<Option<String>, IoError> {
    let Some(value) = var.attribute_value(name) else {
        return Ok(None);
    };
    let s: String = value?.try_into().map_err(|e: netcdf::Error| IoError::InvalidTime {
        reason: format!("'{name}' attribute is not a string: {e}"),
    })?;
    Ok(Some(s))
}

/// Unit of a CF `"<unit> since <reference>"` time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => Some(Self::Seconds),
            "minutes" | "minute" | "mins" | "min" => Some(Self::Minutes),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(Self::Hours),
            "days" | "day" | "d" => Some(Self::Days),
            _ => None,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3600.0,
            Self::Days => 86400.0,
        }
    }
}

/// Parse CF time units like `"hours since 1900-01-01 00:00:00.0"`.
pub(crate) fn parse_time_units(units: &str) -> Result<(TimeUnit, NaiveDateTime), IoError> {
    let invalid = || IoError::InvalidTime {
        reason: format!("unexpected time units format: '{units}'"),
    };

    let mut parts = units.split_whitespace();
    let unit = parts.next().and_then(TimeUnit::parse).ok_or_else(invalid)?;
    if parts.next().map(str::to_lowercase).as_deref() != Some("since") {
        return Err(invalid());
    }
    let reference: Vec<&str> = parts.collect();
    let reference = match reference.as_slice() {
        [date] => date.replace('T', " "),
        [date, time] => format!("{date} {time}"),
        // trailing timezone, e.g. "1970-01-01 00:00:00 UTC"
        [date, time, "UTC" | "utc" | "Z" | "+00:00"] => format!("{date} {time}"),
        _ => return Err(invalid()),
    };
    let reference = reference.trim_end_matches('Z');

    let base = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(reference, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(reference, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("failed to parse reference time '{reference}' in '{units}'"),
        })?;

    Ok((unit, base))
}

/// Convert numeric offsets to timestamps, rounding to the nearest second.
pub(crate) fn offsets_to_times(
    unit: TimeUnit,
    base: NaiveDateTime,
    offsets: &[f64],
) -> Result<Vec<NaiveDateTime>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            let seconds = (offset * unit.seconds()).round();
            if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
                return Err(IoError::InvalidTime {
                    reason: format!("time offset {offset} is out of range"),
                });
            }
            TimeDelta::try_seconds(seconds as i64)
                .and_then(|delta| base.checked_add_signed(delta))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("timestamp overflow adding {offset} {unit:?} to {base}"),
                })
        })
        .collect()
}

/// Read and decode a CF time coordinate variable.
///
/// The `calendar` attribute, when present, must name the proleptic Gregorian
/// calendar under one of its CF spellings.
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<Vec<NaiveDateTime>, IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units = string_attribute(&var, "units")?.ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_var}' has no 'units' attribute"),
    })?;
    if let Some(calendar) = string_attribute(&var, "calendar")?
        && !GREGORIAN_CALENDARS.contains(&calendar.to_lowercase().as_str())
    {
        return Err(IoError::InvalidTime {
            reason: format!("unsupported calendar '{calendar}'"),
        });
    }

    let (unit, base) = parse_time_units(&units)?;
    let offsets = var.get_values::<f64, _>(..)?;
    offsets_to_times(unit, base, &offsets)
}
