//! Global standardization of a field.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GridError;
use crate::field::GriddedField;

/// A scalar `(mean, std)` pair fitted over every value of a field.
///
/// Fit it on the training period only and reuse it for validation and test
/// data so that no held-out statistics leak into the model inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalizer {
    mean: f64,
    std: f64,
}

impl Normalizer {
    /// Create a normalizer from known statistics.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DegenerateSpread`] if `std` is not a positive
    /// finite number.
    pub fn new(mean: f64, std: f64) -> Result<Self, GridError> {
        if !(std.is_finite() && std > 0.0) {
            return Err(GridError::DegenerateSpread { std });
        }
        Ok(Self { mean, std })
    }

    /// Fit the global mean and population standard deviation of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Empty`] for a field without values and
    /// [`GridError::DegenerateSpread`] for a constant field.
    pub fn fit(field: &GriddedField) -> Result<Self, GridError> {
        if field.is_empty() {
            return Err(GridError::Empty {
                reason: "cannot fit normalizer on an empty field".to_string(),
            });
        }
        let data: Cow<'_, [f64]> = match field.values().as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(field.values().iter().copied().collect()),
        };
        let mean = isobar_stats::mean(&data);
        let std = isobar_stats::population_sd(&data);
        debug!(mean, std, n = data.len(), "fitted normalizer");
        Self::new(mean, std)
    }

    /// Fitted mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Fitted standard deviation.
    pub fn std(&self) -> f64 {
        self.std
    }

    /// `(x - mean) / std` for every value.
    pub fn apply(&self, field: &GriddedField) -> GriddedField {
        let (mean, std) = (self.mean, self.std);
        field.map_values(|v| (v - mean) / std)
    }

    /// `x * std + mean` for every value.
    pub fn invert(&self, field: &GriddedField) -> GriddedField {
        let (mean, std) = (self.mean, self.std);
        field.map_values(|v| v * std + mean)
    }
}
