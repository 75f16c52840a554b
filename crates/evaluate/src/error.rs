//! Evaluation error types.

/// Errors that can occur while scoring forecasts or building baselines.
///
/// Every variant is a precondition violation: nothing here is transient, so
/// callers should surface the error rather than retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluateError {
    /// Forecast and ground truth disagree on an axis.
    #[error("shape mismatch on {axis}: {details}")]
    ShapeMismatch { axis: String, details: String },

    /// A field has zero length along some axis.
    #[error("empty input: {field} has shape {shape}")]
    EmptyInput { field: String, shape: String },

    /// Not enough data to build a baseline.
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },

    /// A target timestamp maps to a day-of-year the climatology lacks.
    #[error("no climatology entry for day-of-year {doy} (needed at {time})")]
    MissingClimatologyDay { doy: u16, time: String },

    /// Lead outside `1..n_times`.
    #[error("lead of {lead_steps} steps needs 1 <= lead < {n_times}")]
    InvalidLeadSteps { lead_steps: usize, n_times: usize },

    /// One or more configuration checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation { count: usize, details: String },

    /// Wraps an error from isobar-grid.
    #[error("grid error: {reason}")]
    Grid { reason: String },

    /// Wraps an error from isobar-calendar.
    #[error("calendar error: {reason}")]
    Calendar { reason: String },

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<isobar_grid::GridError> for EvaluateError {
    fn from(e: isobar_grid::GridError) -> Self {
        EvaluateError::Grid {
            reason: e.to_string(),
        }
    }
}

impl From<isobar_calendar::CalendarError> for EvaluateError {
    fn from(e: isobar_calendar::CalendarError) -> Self {
        EvaluateError::Calendar {
            reason: e.to_string(),
        }
    }
}
