//! (input, target) pairs separated by a fixed lead.

use crate::error::GridError;
use crate::field::GriddedField;

/// Split `field` into inputs `X = field[0 .. n - lead]` and targets
/// `Y = field[lead .. n]`, so that `Y[i]` is `lead_steps` steps after `X[i]`.
///
/// # Errors
///
/// Returns [`GridError::InvalidLead`] unless `1 <= lead_steps < n_times`.
pub fn lead_pairs(
    field: &GriddedField,
    lead_steps: usize,
) -> Result<(GriddedField, GriddedField), GridError> {
    let n = field.n_times();
    if lead_steps == 0 || lead_steps >= n {
        return Err(GridError::InvalidLead {
            lead_steps,
            n_times: n,
        });
    }
    let inputs = field.select_time(0..n - lead_steps)?;
    let targets = field.select_time(lead_steps..n)?;
    Ok((inputs, targets))
}
