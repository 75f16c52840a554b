//! Persistence baseline: tomorrow looks like today.

use isobar_grid::GriddedField;
use tracing::debug;

use crate::error::EvaluateError;

/// Persistence forecast at a lead of `lead_steps` time steps.
///
/// Keeps all but the last `lead_steps` entries of `field` and advances each
/// kept timestamp by `lead_steps` steps of the field's own cadence. Values are
/// untouched, so output entry `i` carries input entry `i` relabelled as a
/// forecast valid at `times[i] + lead`.
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidLeadSteps`] unless
/// `1 <= lead_steps < field.n_times()`, and a grid or calendar error if the
/// time axis has no regular cadence.
pub fn persistence_forecast(
    field: &GriddedField,
    lead_steps: usize,
) -> Result<GriddedField, EvaluateError> {
    let n = field.n_times();
    if lead_steps == 0 || lead_steps >= n {
        return Err(EvaluateError::InvalidLeadSteps {
            lead_steps,
            n_times: n,
        });
    }

    let lead = field.cadence()?.lead(lead_steps)?;
    let kept = field.select_time(0..n - lead_steps)?;
    let times = kept
        .times()
        .iter()
        .map(|t| {
            t.checked_add_signed(lead)
                .ok_or_else(|| EvaluateError::Calendar {
                    reason: format!("timestamp overflow adding {lead} to {t}"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        lead_steps,
        lead_hours = lead.num_hours(),
        n_kept = times.len(),
        "built persistence forecast"
    );

    Ok(kept.relabel_times(times)?)
}
