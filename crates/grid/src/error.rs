//! Error types for isobar-grid.

/// Error type for all fallible operations in the isobar-grid crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Returned when an array dimension disagrees with its coordinate axis.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when timestamps are not strictly increasing.
    #[error("time axis not strictly increasing at index {index}")]
    UnorderedTime {
        /// Index of the first timestamp that is not after its predecessor.
        index: usize,
    },

    /// Returned when a coordinate value is not finite or out of range.
    #[error("invalid {axis} coordinate at index {index}: {value}")]
    InvalidCoordinate {
        /// Axis name (`latitude` or `longitude`).
        axis: String,
        /// Index of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when two fields sit on different latitude/longitude grids.
    #[error("{axis} coordinate mismatch at index {index}: {left} vs {right}")]
    CoordinateMismatch {
        /// Axis name (`latitude` or `longitude`).
        axis: String,
        /// First differing index.
        index: usize,
        /// Value in the left-hand field.
        left: f64,
        /// Value in the right-hand field.
        right: f64,
    },

    /// Returned when an operation needs data that is not there.
    #[error("empty field: {reason}")]
    Empty {
        /// What was empty.
        reason: String,
    },

    /// Returned when a time index range falls outside the field.
    #[error("time range {start}..{end} out of bounds for {n_times} entries")]
    TimeRange {
        /// Range start.
        start: usize,
        /// Range end (exclusive).
        end: usize,
        /// Number of time entries in the field.
        n_times: usize,
    },

    /// Returned when a lead offset leaves no (input, target) pairs.
    #[error("lead of {lead_steps} steps needs 1 <= lead < {n_times}")]
    InvalidLead {
        /// Requested lead in steps.
        lead_steps: usize,
        /// Number of time entries in the field.
        n_times: usize,
    },

    /// Returned when a field has no spread to normalize by.
    #[error("cannot normalize: standard deviation is {std}")]
    DegenerateSpread {
        /// The offending standard deviation.
        std: f64,
    },

    /// Wraps an array shape error from ndarray.
    #[error("array shape error: {reason}")]
    Shape {
        /// Description of the shape failure.
        reason: String,
    },

    /// Wraps an error originating from the isobar-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl From<isobar_calendar::CalendarError> for GridError {
    fn from(e: isobar_calendar::CalendarError) -> Self {
        GridError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<ndarray::ShapeError> for GridError {
    fn from(e: ndarray::ShapeError) -> Self {
        GridError::Shape {
            reason: e.to_string(),
        }
    }
}
