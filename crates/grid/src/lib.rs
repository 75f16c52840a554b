//! # isobar-grid
//!
//! The `(time, latitude, longitude)` field model that every other isobar
//! crate passes around, plus the time-axis operations used to build
//! baselines and training pairs from it.
//!
//! Fields are immutable values: every operation returns a new field.

mod align;
mod error;
mod field;
mod normalize;
mod pairs;

pub use align::{align, concat_time};
pub use error::GridError;
pub use field::{COORD_TOLERANCE, GriddedField};
pub use normalize::Normalizer;
pub use pairs::lead_pairs;
