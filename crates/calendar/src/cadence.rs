//! Fixed time-step interval of a time axis.

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::CalendarError;

/// The positive interval between consecutive timestamps of a time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cadence(TimeDelta);

impl Cadence {
    /// Creates a cadence from a step length.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NonPositiveCadence`] if `step` is zero or
    /// negative.
    pub fn new(step: TimeDelta) -> Result<Self, CalendarError> {
        if step <= TimeDelta::zero() {
            return Err(CalendarError::NonPositiveCadence {
                seconds: step.num_seconds(),
            });
        }
        Ok(Self(step))
    }

    /// Infers the cadence of a time axis.
    ///
    /// The first pair of timestamps establishes the step; every later pair
    /// must match it exactly.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::TooFewTimestamps`] for fewer than two
    /// timestamps, [`CalendarError::IrregularCadence`] if spacing varies, and
    /// [`CalendarError::NonPositiveCadence`] if timestamps do not increase.
    pub fn infer(times: &[NaiveDateTime]) -> Result<Self, CalendarError> {
        if times.len() < 2 {
            return Err(CalendarError::TooFewTimestamps { got: times.len() });
        }
        let step = times[1] - times[0];
        for (i, pair) in times.windows(2).enumerate().skip(1) {
            let got = pair[1] - pair[0];
            if got != step {
                return Err(CalendarError::IrregularCadence {
                    index: i + 1,
                    expected_seconds: step.num_seconds(),
                    got_seconds: got.num_seconds(),
                });
            }
        }
        Self::new(step)
    }

    /// The step length in (possibly fractional) hours.
    pub fn hours(self) -> f64 {
        self.0.num_seconds() as f64 / 3600.0
    }

    /// Real-world duration of `steps` steps.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LeadOverflow`] if the product overflows.
    pub fn lead(self, steps: usize) -> Result<TimeDelta, CalendarError> {
        i32::try_from(steps)
            .ok()
            .and_then(|n| self.0.checked_mul(n))
            .ok_or(CalendarError::LeadOverflow { steps })
    }
}
