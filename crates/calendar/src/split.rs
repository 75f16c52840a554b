//! Inclusive calendar-year ranges and train/validation/test splits.

use std::fmt;

use crate::error::CalendarError;

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Creates the range `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidYearRange`] if `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one year.
    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    /// First year.
    pub fn start(self) -> i32 {
        self.start
    }

    /// Last year.
    pub fn end(self) -> i32 {
        self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Train, validation and test year ranges, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSplit {
    train: YearRange,
    validation: YearRange,
    test: YearRange,
}

impl Default for DataSplit {
    /// Training on 1979-2015, validating on 2016, testing on 2017-2018.
    fn default() -> Self {
        Self {
            train: YearRange {
                start: 1979,
                end: 2015,
            },
            validation: YearRange::single(2016),
            test: YearRange {
                start: 2017,
                end: 2018,
            },
        }
    }
}

impl DataSplit {
    /// Creates a split, checking that the ranges do not overlap and are in
    /// chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OverlappingSplit`] naming the first offending
    /// pair of ranges.
    pub fn new(
        train: YearRange,
        validation: YearRange,
        test: YearRange,
    ) -> Result<Self, CalendarError> {
        if train.end >= validation.start {
            return Err(CalendarError::OverlappingSplit {
                first: "train".to_string(),
                second: "validation".to_string(),
            });
        }
        if validation.end >= test.start {
            return Err(CalendarError::OverlappingSplit {
                first: "validation".to_string(),
                second: "test".to_string(),
            });
        }
        Ok(Self {
            train,
            validation,
            test,
        })
    }

    /// Training years.
    pub fn train(&self) -> YearRange {
        self.train
    }

    /// Validation years.
    pub fn validation(&self) -> YearRange {
        self.validation
    }

    /// Test years.
    pub fn test(&self) -> YearRange {
        self.test
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_range_valid() {
        let r = YearRange::new(1979, 2015).unwrap();
        assert_eq!((r.start(), r.end()), (1979, 2015));
        assert_eq!(r.to_string(), "1979-2015");
    }

    #[test]
    fn year_range_reversed() {
        assert_eq!(
            YearRange::new(2018, 2017).unwrap_err(),
            CalendarError::InvalidYearRange {
                start: 2018,
                end: 2017,
            }
        );
    }

    #[test]
    fn single_year_display() {
        assert_eq!(YearRange::single(2016).to_string(), "2016");
    }

    #[test]
    fn default_split() {
        let split = DataSplit::default();
        assert_eq!(split.train(), YearRange::new(1979, 2015).unwrap());
        assert_eq!(split.validation(), YearRange::single(2016));
        assert_eq!(split.test(), YearRange::new(2017, 2018).unwrap());
    }

    #[test]
    fn overlapping_split_rejected() {
        let err = DataSplit::new(
            YearRange::new(1979, 2016).unwrap(),
            YearRange::single(2016),
            YearRange::new(2017, 2018).unwrap(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CalendarError::OverlappingSplit {
                first: "train".to_string(),
                second: "validation".to_string(),
            }
        );

        let err = DataSplit::new(
            YearRange::new(1979, 2014).unwrap(),
            YearRange::single(2018),
            YearRange::new(2017, 2018).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, CalendarError::OverlappingSplit { .. }));
    }
}
