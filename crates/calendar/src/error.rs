//! Error types for the isobar-calendar crate.

/// Error type for all fallible operations in the isobar-calendar crate.
///
/// Covers day-of-year validation, cadence inference over time axes, and
/// calendar-year range construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a leap-day policy name is not recognised.
    #[error("unknown leap-day policy: '{name}' (expected 'separate' or 'fold_into_365')")]
    UnknownLeapPolicy {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a cadence is zero or negative.
    #[error("cadence must be positive, got {seconds} s")]
    NonPositiveCadence {
        /// The offending step length in seconds.
        seconds: i64,
    },

    /// Returned when a time axis is too short to infer a cadence.
    #[error("need at least 2 timestamps to infer cadence, got {got}")]
    TooFewTimestamps {
        /// Number of timestamps available.
        got: usize,
    },

    /// Returned when consecutive timestamps are not equally spaced.
    #[error(
        "irregular cadence at index {index}: expected {expected_seconds} s, got {got_seconds} s"
    )]
    IrregularCadence {
        /// Index of the later timestamp of the offending pair.
        index: usize,
        /// Step length established by the first pair.
        expected_seconds: i64,
        /// Step length found at `index`.
        got_seconds: i64,
    },

    /// Returned when a lead duration does not fit in a time delta.
    #[error("lead of {steps} steps overflows the representable duration")]
    LeadOverflow {
        /// Requested number of steps.
        steps: usize,
    },

    /// Returned when a year range starts after it ends.
    #[error("invalid year range: {start}..={end}")]
    InvalidYearRange {
        /// First year of the range.
        start: i32,
        /// Last year of the range.
        end: i32,
    },

    /// Returned when two ranges of a split overlap or are out of order.
    #[error("{first} range must end before {second} range starts")]
    OverlappingSplit {
        /// Name of the earlier range.
        first: String,
        /// Name of the later range.
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_doy() {
        let err = CalendarError::InvalidDoy { doy: 0 };
        assert_eq!(err.to_string(), "invalid day of year: 0 (must be 1..=366)");
    }

    #[test]
    fn error_irregular_cadence() {
        let err = CalendarError::IrregularCadence {
            index: 3,
            expected_seconds: 43_200,
            got_seconds: 86_400,
        };
        assert_eq!(
            err.to_string(),
            "irregular cadence at index 3: expected 43200 s, got 86400 s"
        );
    }

    #[test]
    fn error_overlapping_split() {
        let err = CalendarError::OverlappingSplit {
            first: "train".to_string(),
            second: "validation".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "train range must end before validation range starts"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
