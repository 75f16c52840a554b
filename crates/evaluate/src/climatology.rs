//! Day-of-year and constant climatology baselines.

use std::collections::BTreeMap;

use isobar_calendar::{Doy, LeapDayPolicy};
use isobar_grid::{COORD_TOLERANCE, GriddedField};
use ndarray::{Array2, ArrayView2, Axis};
use tracing::{debug, info};

use crate::config::EvaluateConfig;
use crate::error::EvaluateError;
use crate::rmse::{grid_mismatch, weighted_rmse};

/// Per-day-of-year mean fields computed from a training period.
///
/// Each entry is the cell-wise mean over every training time entry that
/// falls on that day-of-year, across all years. Time entries within a day
/// (e.g. 00:00 and 12:00) are pooled into the same bucket.
#[derive(Debug, Clone)]
pub struct ClimatologyTable {
    policy: LeapDayPolicy,
    lats: Vec<f64>,
    lons: Vec<f64>,
    means: BTreeMap<Doy, Array2<f64>>,
    counts: BTreeMap<Doy, usize>,
}

impl ClimatologyTable {
    /// Build the table from `training`, grouping days with the configured
    /// leap-day policy.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::InsufficientData`] if `training` is empty, or,
    /// when a full year is required, if any day 1..=365 has no entries.
    pub fn build(
        training: &GriddedField,
        config: &EvaluateConfig,
    ) -> Result<Self, EvaluateError> {
        if training.is_empty() {
            let (nt, ny, nx) = training.shape();
            return Err(EvaluateError::InsufficientData {
                reason: format!("training field has shape ({nt}, {ny}, {nx})"),
            });
        }

        let policy = config.leap_policy();
        let mut sums: BTreeMap<Doy, (Array2<f64>, usize)> = BTreeMap::new();
        for (t, time) in training.times().iter().enumerate() {
            let doy = Doy::from_date(time, policy);
            let slice = training.values().index_axis(Axis(0), t);
            let (sum, count) = sums
                .entry(doy)
                .or_insert_with(|| (Array2::zeros(slice.raw_dim()), 0));
            *sum += &slice;
            *count += 1;
        }

        if config.require_full_year() {
            for d in 1..=365 {
                let doy = Doy::new(d)?;
                if !sums.contains_key(&doy) {
                    return Err(EvaluateError::InsufficientData {
                        reason: format!("day-of-year {d} has no training entries"),
                    });
                }
            }
        }

        let mut means = BTreeMap::new();
        let mut counts = BTreeMap::new();
        for (doy, (sum, count)) in sums {
            means.insert(doy, sum / count as f64);
            counts.insert(doy, count);
        }

        info!(
            n_days = means.len(),
            n_times = training.n_times(),
            %policy,
            "built day-of-year climatology"
        );

        Ok(Self {
            policy,
            lats: training.lats().to_vec(),
            lons: training.lons().to_vec(),
            means,
            counts,
        })
    }

    /// Leap-day policy the table was built with.
    pub fn policy(&self) -> LeapDayPolicy {
        self.policy
    }

    /// Latitude coordinates of the table's grid.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates of the table's grid.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Number of day-of-year entries.
    pub fn len(&self) -> usize {
        self.means.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Mean field for `doy`, if present.
    pub fn get(&self, doy: Doy) -> Option<ArrayView2<'_, f64>> {
        self.means.get(&doy).map(|m| m.view())
    }

    /// Number of training entries that contributed to `doy`.
    pub fn count(&self, doy: Doy) -> usize {
        self.counts.get(&doy).copied().unwrap_or(0)
    }

    /// Entries in day-of-year order.
    pub fn iter(&self) -> impl Iterator<Item = (Doy, ArrayView2<'_, f64>)> {
        self.means.iter().map(|(doy, m)| (*doy, m.view()))
    }

    /// Climatology forecast on the time axis of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::ShapeMismatch`] if the grids differ,
    /// [`EvaluateError::EmptyInput`] if `target` has no time entries, and
    /// [`EvaluateError::MissingClimatologyDay`] for the first target
    /// timestamp whose day-of-year is not in the table.
    pub fn forecast_for(&self, target: &GriddedField) -> Result<GriddedField, EvaluateError> {
        self.check_grid(target)?;
        if target.n_times() == 0 {
            let (nt, ny, nx) = target.shape();
            return Err(EvaluateError::EmptyInput {
                field: "target".to_string(),
                shape: format!("({nt}, {ny}, {nx})"),
            });
        }

        let views = target
            .times()
            .iter()
            .map(|time| {
                let doy = Doy::from_date(time, self.policy);
                self.get(doy).ok_or_else(|| EvaluateError::MissingClimatologyDay {
                    doy: doy.get(),
                    time: time.format("%Y-%m-%dT%H:%M:%S").to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let values = ndarray::stack(Axis(0), &views).map_err(|e| EvaluateError::Grid {
            reason: e.to_string(),
        })?;
        debug!(n_times = target.n_times(), "assembled climatology forecast");
        Ok(target.with_values(values)?)
    }

    fn check_grid(&self, target: &GriddedField) -> Result<(), EvaluateError> {
        for (axis, ours, theirs) in [
            ("latitude", &self.lats, target.lats()),
            ("longitude", &self.lons, target.lons()),
        ] {
            if ours.len() != theirs.len() {
                return Err(EvaluateError::ShapeMismatch {
                    axis: axis.to_string(),
                    details: format!(
                        "climatology has {} entries, target has {}",
                        ours.len(),
                        theirs.len()
                    ),
                });
            }
            if let Some(i) = ours
                .iter()
                .zip(theirs)
                .position(|(a, b)| (a - b).abs() > COORD_TOLERANCE)
            {
                return Err(EvaluateError::ShapeMismatch {
                    axis: axis.to_string(),
                    details: format!(
                        "climatology has {} at index {i}, target has {}",
                        ours[i], theirs[i]
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Weighted RMSE of the day-of-year climatology against `target`.
///
/// # Errors
///
/// As [`ClimatologyTable::forecast_for`] and [`weighted_rmse`].
pub fn evaluate_climatology(
    table: &ClimatologyTable,
    target: &GriddedField,
) -> Result<f64, EvaluateError> {
    let forecast = table.forecast_for(target)?;
    weighted_rmse(&forecast, target)
}

/// The training time-mean repeated along the time axis of `target`.
///
/// # Errors
///
/// Returns [`EvaluateError::InsufficientData`] if `training` has no time
/// entries and [`EvaluateError::ShapeMismatch`] if the grids differ.
pub fn constant_climatology(
    training: &GriddedField,
    target: &GriddedField,
) -> Result<GriddedField, EvaluateError> {
    training.check_same_grid(target).map_err(grid_mismatch)?;
    let mean = training
        .time_mean()
        .ok_or_else(|| EvaluateError::InsufficientData {
            reason: "training field has no time entries".to_string(),
        })?;
    let values = mean
        .broadcast(target.shape())
        .ok_or_else(|| EvaluateError::ShapeMismatch {
            axis: "grid".to_string(),
            details: "time mean does not broadcast onto target".to_string(),
        })?
        .to_owned();
    Ok(target.with_values(values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use ndarray::Array3;

    fn daily(start: (i32, u32, u32), n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(start.0, start.1, start.2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n as i64).map(|i| t0 + TimeDelta::days(i)).collect()
    }

    fn short_config() -> EvaluateConfig {
        EvaluateConfig::default().with_require_full_year(false)
    }

    fn field(times: Vec<NaiveDateTime>, f: impl Fn(usize) -> f64) -> GriddedField {
        let n = times.len();
        let values = Array3::from_shape_fn((n, 2, 2), |(t, _, _)| f(t));
        GriddedField::new(times, vec![-30.0, 30.0], vec![0.0, 90.0], values).unwrap()
    }

    #[test]
    fn pools_same_day_across_years() {
        // Jan 1-3 of 2017 and 2018 with values 0..3 and 10..13.
        let mut times = daily((2017, 1, 1), 3);
        times.extend(daily((2018, 1, 1), 3));
        let f = field(times, |t| if t < 3 { t as f64 } else { 10.0 + (t - 3) as f64 });

        let table = ClimatologyTable::build(&f, &short_config()).unwrap();
        assert_eq!(table.len(), 3);
        for d in 1..=3u16 {
            let doy = Doy::new(d).unwrap();
            assert_eq!(table.count(doy), 2);
            assert_eq!(table.get(doy).unwrap()[[0, 0]], 5.0 + (d - 1) as f64);
        }
    }

    #[test]
    fn empty_training_rejected() {
        let f = field(vec![], |_| 0.0);
        assert!(matches!(
            ClimatologyTable::build(&f, &short_config()),
            Err(EvaluateError::InsufficientData { .. })
        ));
    }

    #[test]
    fn partial_year_rejected_when_full_year_required() {
        let f = field(daily((2017, 1, 1), 30), |_| 0.0);
        let err = ClimatologyTable::build(&f, &EvaluateConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EvaluateError::InsufficientData {
                reason: "day-of-year 31 has no training entries".to_string(),
            }
        );
    }

    #[test]
    fn missing_day_reported() {
        let train = field(daily((2017, 1, 1), 2), |_| 1.0);
        let table = ClimatologyTable::build(&train, &short_config()).unwrap();
        let target = field(daily((2018, 1, 2), 2), |_| 1.0);
        let err = table.forecast_for(&target).unwrap_err();
        assert_eq!(
            err,
            EvaluateError::MissingClimatologyDay {
                doy: 3,
                time: "2018-01-03T00:00:00".to_string(),
            }
        );
    }

    #[test]
    fn forecast_grid_mismatch() {
        let train = field(daily((2017, 1, 1), 2), |_| 1.0);
        let table = ClimatologyTable::build(&train, &short_config()).unwrap();
        let target = GriddedField::new(
            daily((2018, 1, 1), 1),
            vec![-30.0, 31.0],
            vec![0.0, 90.0],
            Array3::zeros((1, 2, 2)),
        )
        .unwrap();
        assert!(matches!(
            table.forecast_for(&target),
            Err(EvaluateError::ShapeMismatch { ref axis, .. }) if axis == "latitude"
        ));
    }

    #[test]
    fn evaluate_on_own_training_data_of_one_year_is_zero() {
        let f = field(daily((2017, 1, 1), 365), |t| (t % 17) as f64);
        let table = ClimatologyTable::build(&f, &EvaluateConfig::default()).unwrap();
        assert_eq!(evaluate_climatology(&table, &f).unwrap(), 0.0);
    }

    #[test]
    fn constant_climatology_repeats_mean() {
        let train = field(daily((2017, 1, 1), 4), |t| t as f64);
        let target = field(daily((2018, 1, 1), 3), |_| 0.0);
        let c = constant_climatology(&train, &target).unwrap();
        assert_eq!(c.times(), target.times());
        assert!(c.values().iter().all(|&v| v == 1.5));
    }

    #[test]
    fn constant_climatology_needs_data() {
        let train = field(vec![], |_| 0.0);
        let target = field(daily((2018, 1, 1), 3), |_| 0.0);
        assert!(matches!(
            constant_climatology(&train, &target),
            Err(EvaluateError::InsufficientData { .. })
        ));
    }
}
