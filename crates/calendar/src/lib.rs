//! # isobar-calendar
//!
//! Calendar arithmetic for gridded time axes on the proleptic Gregorian
//! calendar.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDateTime"] -->|"Doy::from_date(policy)"| B["Doy (1..=366)"]
//!     C["time axis"] -->|"Cadence::infer()"| D["Cadence"]
//!     D -->|".lead(steps)"| E["TimeDelta"]
//!     F["DataSplit"] -->|".train() / .test()"| G["YearRange"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use isobar_calendar::{Cadence, DataSplit, Doy, LeapDayPolicy, YearRange};
//!
//! // Day-of-year with an explicit leap-day policy
//! let date = chrono::NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();
//! assert_eq!(Doy::from_date(&date, LeapDayPolicy::Separate).get(), 366);
//! assert_eq!(Doy::from_date(&date, LeapDayPolicy::FoldInto365).get(), 365);
//!
//! // 10 steps at 12-hour cadence = 5 days
//! let lead = Cadence::new(chrono::TimeDelta::hours(12)).unwrap().lead(10).unwrap();
//! assert_eq!(lead.num_days(), 5);
//!
//! // Train / validation / test years
//! let split = DataSplit::default();
//! assert_eq!(split.test().start(), 2017);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and leap-day policy |
//! | `cadence` | Fixed time-step interval of a time axis |
//! | `split` | Inclusive calendar-year ranges and data splits |
//! | `error` | Error types |

mod cadence;
mod doy;
mod error;
mod split;

pub use cadence::Cadence;
pub use doy::{Doy, LeapDayPolicy};
pub use error::CalendarError;
pub use split::{DataSplit, YearRange};
