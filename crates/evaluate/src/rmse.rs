//! Latitude-weighted root-mean-squared error.

use isobar_grid::{GridError, GriddedField};
use ndarray::{Array1, Axis};
use rayon::prelude::*;

use crate::error::EvaluateError;
use crate::weights::latitude_weights;

/// Latitude-weighted RMSE between `forecast` and `truth`.
///
/// The squared error is weighted by [`latitude_weights`] broadcast over time
/// and longitude, averaged over all cells jointly, and square-rooted. The
/// fields must already be aligned in time; only their shapes are compared,
/// not their timestamps.
///
/// # Errors
///
/// Returns [`EvaluateError::EmptyInput`] if either field has a zero-length
/// axis and [`EvaluateError::ShapeMismatch`] if the axes differ in length or
/// the latitude/longitude coordinates differ.
pub fn weighted_rmse(forecast: &GriddedField, truth: &GriddedField) -> Result<f64, EvaluateError> {
    check_compatible(forecast, truth)?;

    let weights = Array1::from(latitude_weights(truth.lats()))
        .insert_axis(Axis(1))
        .insert_axis(Axis(0));
    let squared = (forecast.values() - truth.values()).mapv(|e| e * e);
    let mse = (&squared * &weights)
        .mean()
        .ok_or_else(|| empty_input("forecast", forecast))?;
    Ok(mse.sqrt())
}

/// Latitude-weighted RMSE for each time step separately.
///
/// Entry `t` is the RMSE over the latitude/longitude grid at time index `t`.
/// Steps are reduced in parallel; the result follows the time axis order.
///
/// # Errors
///
/// As [`weighted_rmse`].
pub fn weighted_rmse_per_step(
    forecast: &GriddedField,
    truth: &GriddedField,
) -> Result<Vec<f64>, EvaluateError> {
    check_compatible(forecast, truth)?;

    let weights = Array1::from(latitude_weights(truth.lats())).insert_axis(Axis(1));
    let (f, g) = (forecast.values(), truth.values());
    let steps: Vec<f64> = (0..forecast.n_times())
        .into_par_iter()
        .map(|t| {
            let squared = (&f.index_axis(Axis(0), t) - &g.index_axis(Axis(0), t)).mapv(|e| e * e);
            (&squared * &weights).mean().map_or(0.0, f64::sqrt)
        })
        .collect();
    Ok(steps)
}

/// Check the preconditions shared by both RMSE variants.
pub(crate) fn check_compatible(
    forecast: &GriddedField,
    truth: &GriddedField,
) -> Result<(), EvaluateError> {
    for (name, field) in [("forecast", forecast), ("ground truth", truth)] {
        if field.is_empty() {
            return Err(empty_input(name, field));
        }
    }

    let (ft, fy, fx) = forecast.shape();
    let (tt, ty, tx) = truth.shape();
    for (axis, f, t) in [("time", ft, tt), ("latitude", fy, ty), ("longitude", fx, tx)] {
        if f != t {
            return Err(EvaluateError::ShapeMismatch {
                axis: axis.to_string(),
                details: format!("forecast has {f} entries, ground truth has {t}"),
            });
        }
    }

    forecast.check_same_grid(truth).map_err(grid_mismatch)
}

/// Map a grid comparison failure onto [`EvaluateError::ShapeMismatch`].
pub(crate) fn grid_mismatch(e: GridError) -> EvaluateError {
    let axis = match &e {
        GridError::CoordinateMismatch { axis, .. } => axis.clone(),
        GridError::DimensionMismatch { name, .. } => name.clone(),
        _ => "grid".to_string(),
    };
    EvaluateError::ShapeMismatch {
        axis,
        details: e.to_string(),
    }
}

fn empty_input(name: &str, field: &GriddedField) -> EvaluateError {
    let (nt, ny, nx) = field.shape();
    EvaluateError::EmptyInput {
        field: name.to_string(),
        shape: format!("({nt}, {ny}, {nx})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use ndarray::Array3;

    fn times(n: usize) -> Vec<NaiveDateTime> {
        let t0 = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n as i64).map(|i| t0 + TimeDelta::hours(12 * i)).collect()
    }

    fn constant(n: usize, lats: Vec<f64>, value: f64) -> GriddedField {
        let ny = lats.len();
        GriddedField::new(times(n), lats, vec![0.0, 180.0], Array3::from_elem((n, ny, 2), value))
            .unwrap()
    }

    #[test]
    fn zero_vs_one_is_exactly_one() {
        let forecast = constant(3, vec![0.0, 60.0], 0.0);
        let truth = constant(3, vec![0.0, 60.0], 1.0);
        assert_relative_eq!(weighted_rmse(&forecast, &truth).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn hand_computed_weighting() {
        // Error 3 on the equator row, 0 on the 60N row.
        // w = [4/3, 2/3]; mean(e^2 * w) = (9 * 4/3 + 0) / 2 = 6
        let truth = constant(3, vec![0.0, 60.0], 0.0);
        let mut values = Array3::<f64>::zeros((3, 2, 2));
        values.index_axis_mut(Axis(1), 0).fill(3.0);
        let forecast = truth.with_values(values).unwrap();
        assert_relative_eq!(
            weighted_rmse(&forecast, &truth).unwrap(),
            6.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn per_step_follows_time_axis() {
        let truth = constant(3, vec![0.0, 60.0], 0.0);
        let values = Array3::from_shape_fn((3, 2, 2), |(t, _, _)| t as f64);
        let forecast = truth.with_values(values).unwrap();
        let steps = weighted_rmse_per_step(&forecast, &truth).unwrap();
        assert_eq!(steps.len(), 3);
        for (t, rmse) in steps.iter().enumerate() {
            assert_relative_eq!(*rmse, t as f64, epsilon = 1e-12);
        }
    }

    #[test]
    fn time_length_mismatch() {
        let err = weighted_rmse(
            &constant(3, vec![0.0, 60.0], 0.0),
            &constant(4, vec![0.0, 60.0], 0.0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EvaluateError::ShapeMismatch {
                axis: "time".to_string(),
                details: "forecast has 3 entries, ground truth has 4".to_string(),
            }
        );
    }

    #[test]
    fn coordinate_mismatch() {
        let err = weighted_rmse(
            &constant(3, vec![0.0, 60.0], 0.0),
            &constant(3, vec![0.0, 61.0], 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, EvaluateError::ShapeMismatch { ref axis, .. } if axis == "latitude"));
    }

    #[test]
    fn empty_input_rejected() {
        let empty = constant(0, vec![0.0, 60.0], 0.0);
        let err = weighted_rmse(&empty, &empty).unwrap_err();
        assert_eq!(
            err,
            EvaluateError::EmptyInput {
                field: "forecast".to_string(),
                shape: "(0, 2, 2)".to_string(),
            }
        );
        assert!(matches!(
            weighted_rmse_per_step(&constant(2, vec![], 0.0), &constant(2, vec![], 0.0)),
            Err(EvaluateError::EmptyInput { .. })
        ));
    }
}
