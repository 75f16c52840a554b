//! Gridded `(time, latitude, longitude)` field.

use std::ops::Range;

use chrono::{Datelike, NaiveDateTime};
use isobar_calendar::{Cadence, YearRange};
use ndarray::{Array2, Array3, Axis, s};

use crate::error::GridError;

/// Largest difference (degrees) at which two coordinate values count as equal.
pub const COORD_TOLERANCE: f64 = 1e-6;

/// A single scalar quantity on a regular latitude/longitude grid over time.
///
/// Values are indexed `[time, lat, lon]`. Construction validates that the
/// array shape matches the three coordinate axes, that coordinates are
/// finite with latitudes in [-90, 90], and that timestamps are strictly
/// increasing. Any axis may be empty; consumers that need data
/// check [`GriddedField::is_empty`] themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GriddedField {
    times: Vec<NaiveDateTime>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Array3<f64>,
}

impl GriddedField {
    /// Create a new field after validating shape and time ordering.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if `values` is not shaped
    /// `(times.len(), lats.len(), lons.len())`.
    ///
    /// Returns [`GridError::InvalidCoordinate`] if a latitude is not finite
    /// or outside [-90, 90], or a longitude is not finite.
    ///
    /// Returns [`GridError::UnorderedTime`] if `times` is not strictly
    /// increasing.
    pub fn new(
        times: Vec<NaiveDateTime>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Array3<f64>,
    ) -> Result<Self, GridError> {
        let (nt, ny, nx) = values.dim();
        for (name, expected, got) in [
            ("time", times.len(), nt),
            ("lat", lats.len(), ny),
            ("lon", lons.len(), nx),
        ] {
            if expected != got {
                return Err(GridError::DimensionMismatch {
                    name: name.to_string(),
                    expected,
                    got,
                });
            }
        }

        check_coordinates("latitude", &lats, |v| (-90.0..=90.0).contains(&v))?;
        check_coordinates("longitude", &lons, f64::is_finite)?;

        if let Some(i) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(GridError::UnorderedTime { index: i + 1 });
        }

        Ok(Self {
            times,
            lats,
            lons,
            values,
        })
    }

    /// Create a field from row-major `[time, lat, lon]` data.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Shape`] if `data.len()` is not
    /// `times.len() * lats.len() * lons.len()`, otherwise as [`GriddedField::new`].
    pub fn from_flat(
        times: Vec<NaiveDateTime>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        data: Vec<f64>,
    ) -> Result<Self, GridError> {
        let values = Array3::from_shape_vec((times.len(), lats.len(), lons.len()), data)?;
        Self::new(times, lats, lons, values)
    }

    /// Timestamps, strictly increasing.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Latitude coordinates in degrees.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates in degrees.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Values indexed `[time, lat, lon]`.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Number of time entries.
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Number of latitude rows.
    pub fn n_lats(&self) -> usize {
        self.lats.len()
    }

    /// Number of longitude columns.
    pub fn n_lons(&self) -> usize {
        self.lons.len()
    }

    /// `(time, lat, lon)` sizes.
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    /// Whether any axis has zero length.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Same axes with `values` replaced.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the new array has a
    /// different shape.
    pub fn with_values(&self, values: Array3<f64>) -> Result<Self, GridError> {
        Self::new(self.times.clone(), self.lats.clone(), self.lons.clone(), values)
    }

    /// Same axes with `f` applied to every value.
    pub fn map_values<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            times: self.times.clone(),
            lats: self.lats.clone(),
            lons: self.lons.clone(),
            values: self.values.mapv(f),
        }
    }

    /// Same values with new time labels.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] if the number of labels
    /// changes, or [`GridError::UnorderedTime`] if they are not strictly
    /// increasing.
    pub fn relabel_times(&self, times: Vec<NaiveDateTime>) -> Result<Self, GridError> {
        Self::new(times, self.lats.clone(), self.lons.clone(), self.values.clone())
    }

    /// Entries whose time index lies in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::TimeRange`] if `range` is reversed or extends
    /// past the end of the time axis.
    pub fn select_time(&self, range: Range<usize>) -> Result<Self, GridError> {
        if range.start > range.end || range.end > self.n_times() {
            return Err(GridError::TimeRange {
                start: range.start,
                end: range.end,
                n_times: self.n_times(),
            });
        }
        Ok(Self {
            times: self.times[range.clone()].to_vec(),
            lats: self.lats.clone(),
            lons: self.lons.clone(),
            values: self.values.slice(s![range, .., ..]).to_owned(),
        })
    }

    /// Entries at the given time indices, in the given order.
    ///
    /// # Errors
    ///
    /// As [`GriddedField::new`]; indices must be strictly increasing and in
    /// bounds.
    pub fn select_indices(&self, indices: &[usize]) -> Result<Self, GridError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.n_times()) {
            return Err(GridError::TimeRange {
                start: bad,
                end: bad + 1,
                n_times: self.n_times(),
            });
        }
        let times = indices.iter().map(|&i| self.times[i]).collect();
        let values = self.values.select(Axis(0), indices);
        Self::new(times, self.lats.clone(), self.lons.clone(), values)
    }

    /// Entries whose calendar year falls in `years`.
    pub fn slice_years(&self, years: YearRange) -> Self {
        let start = self.times.partition_point(|t| t.year() < years.start());
        let end = self.times.partition_point(|t| t.year() <= years.end());
        Self {
            times: self.times[start..end].to_vec(),
            lats: self.lats.clone(),
            lons: self.lons.clone(),
            values: self.values.slice(s![start..end, .., ..]).to_owned(),
        }
    }

    /// Cadence inferred from the time axis.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Calendar`] if the axis has fewer than two
    /// entries or is irregular.
    pub fn cadence(&self) -> Result<Cadence, GridError> {
        Ok(Cadence::infer(&self.times)?)
    }

    /// Check that `other` has the same latitude and longitude coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] for differing axis lengths
    /// and [`GridError::CoordinateMismatch`] for the first differing value.
    pub fn check_same_grid(&self, other: &GriddedField) -> Result<(), GridError> {
        check_axis("latitude", &self.lats, &other.lats)?;
        check_axis("longitude", &self.lons, &other.lons)
    }

    /// Mean over the time axis, or `None` if there are no time entries.
    pub fn time_mean(&self) -> Option<Array2<f64>> {
        if self.times.is_empty() {
            return None;
        }
        self.values.mean_axis(Axis(0))
    }
}

fn check_axis(axis: &str, left: &[f64], right: &[f64]) -> Result<(), GridError> {
    if left.len() != right.len() {
        return Err(GridError::DimensionMismatch {
            name: axis.to_string(),
            expected: left.len(),
            got: right.len(),
        });
    }
    if let Some(index) = left
        .iter()
        .zip(right)
        .position(|(a, b)| (a - b).abs() > COORD_TOLERANCE)
    {
        return Err(GridError::CoordinateMismatch {
            axis: axis.to_string(),
            index,
            left: left[index],
            right: right[index],
        });
    }
    Ok(())
}

fn check_coordinates(
    axis: &str,
    values: &[f64],
    valid: impl Fn(f64) -> bool,
) -> Result<(), GridError> {
    match values.iter().position(|&v| !valid(v)) {
        Some(index) => Err(GridError::InvalidCoordinate {
            axis: axis.to_string(),
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}
