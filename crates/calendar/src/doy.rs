//! Day-of-year newtype and the leap-day grouping policy.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;

use crate::error::CalendarError;

/// How the extra ordinal of a leap year is grouped.
///
/// Both policies group by calendar ordinal, not by month and day. Gregorian
/// ordinals run 1..=366 in leap years, so every day from 1 March onward sits
/// one ordinal later than in a common year. 29 February itself is never a
/// bucket of its own: it has ordinal 60 and shares that bucket with 1 March
/// of common years. Only 31 December of a leap year reaches ordinal 366.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeapDayPolicy {
    /// Keep the ordinal as-is. Day 366 is its own bucket, filled only by
    /// 31 December of leap years.
    #[default]
    Separate,
    /// Map ordinal 366 onto day 365, so 31 December of a leap year pools
    /// with 31 December of common years.
    FoldInto365,
}

impl fmt::Display for LeapDayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separate => f.write_str("separate"),
            Self::FoldInto365 => f.write_str("fold_into_365"),
        }
    }
}

impl FromStr for LeapDayPolicy {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "separate" => Ok(Self::Separate),
            "fold_into_365" | "fold" => Ok(Self::FoldInto365),
            other => Err(CalendarError::UnknownLeapPolicy {
                name: other.to_string(),
            }),
        }
    }
}

/// Day-of-year on the Gregorian calendar (1..=366).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=366).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Day-of-year of `date` under `policy`.
    pub fn from_date<D: Datelike>(date: &D, policy: LeapDayPolicy) -> Self {
        // chrono ordinals are always 1..=366
        let ordinal = date.ordinal() as u16;
        match (policy, ordinal) {
            (LeapDayPolicy::FoldInto365, 366) => Self(365),
            _ => Self(ordinal),
        }
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Doy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
