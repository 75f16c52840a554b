//! Timestamp alignment and concatenation along time.

use std::cmp::Ordering;

use ndarray::{ArrayView3, Axis};
use tracing::debug;

use crate::error::GridError;
use crate::field::GriddedField;

/// Inner join of two fields on their timestamps.
///
/// Returns both fields restricted to the timestamps they share, so that the
/// results have identical time axes. Both inputs must sit on the same grid.
///
/// # Errors
///
/// Returns [`GridError::DimensionMismatch`] or
/// [`GridError::CoordinateMismatch`] if the grids differ.
pub fn align(
    left: &GriddedField,
    right: &GriddedField,
) -> Result<(GriddedField, GriddedField), GridError> {
    left.check_same_grid(right)?;

    let (lt, rt) = (left.times(), right.times());
    let mut left_idx = Vec::new();
    let mut right_idx = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < lt.len() && j < rt.len() {
        match lt[i].cmp(&rt[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                left_idx.push(i);
                right_idx.push(j);
                i += 1;
                j += 1;
            }
        }
    }

    debug!(
        left = lt.len(),
        right = rt.len(),
        shared = left_idx.len(),
        "aligned time axes"
    );

    Ok((
        left.select_indices(&left_idx)?,
        right.select_indices(&right_idx)?,
    ))
}

/// Concatenate fields along time.
///
/// Fields are ordered by their first timestamp (empty fields are dropped)
/// and must all share the grid of the first one. The result must still be
/// strictly increasing in time, so overlapping inputs fail.
///
/// # Errors
///
/// Returns [`GridError::Empty`] if no field has any time entries, a grid
/// error if grids differ, or [`GridError::UnorderedTime`] on overlap.
pub fn concat_time(fields: Vec<GriddedField>) -> Result<GriddedField, GridError> {
    let mut parts: Vec<GriddedField> = fields.into_iter().filter(|f| f.n_times() > 0).collect();
    parts.sort_by_key(|f| f.times()[0]);

    let first = parts.first().ok_or_else(|| GridError::Empty {
        reason: "nothing to concatenate".to_string(),
    })?;
    for part in &parts[1..] {
        first.check_same_grid(part)?;
    }

    let times = parts.iter().flat_map(|f| f.times().iter().copied()).collect();
    let views: Vec<ArrayView3<'_, f64>> = parts.iter().map(|f| f.values().view()).collect();
    let values = ndarray::concatenate(Axis(0), &views)?;

    debug!(n_parts = parts.len(), "concatenated fields along time");

    GriddedField::new(times, first.lats().to_vec(), first.lons().to_vec(), values)
}
