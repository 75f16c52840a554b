//! # isobar-io
//!
//! Read gridded fields from NetCDF files and write fields and climatology
//! tables back out. Bridges CF-convention files into the
//! [`isobar_grid::GriddedField`] model used by the rest of the workspace.

mod error;
mod netcdf_read;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{ReaderConfig, read_netcdf, read_netcdf_many};
pub use writer::{WriterConfig, write_climatology, write_netcdf};
