//! Integration tests: write fields and climatology tables to NetCDF and read
//! them back.

use chrono::{NaiveDate, TimeDelta};
use isobar_evaluate::{ClimatologyTable, EvaluateConfig};
use isobar_grid::GriddedField;
use isobar_io::{IoError, ReaderConfig, WriterConfig, read_netcdf, write_climatology, write_netcdf};
use ndarray::Array3;
use tempfile::tempdir;

/// Twelve-hourly field starting at 2016-12-30 06:00, crossing a leap-year end.
fn field(nt: usize) -> GriddedField {
    let t0 = NaiveDate::from_ymd_opt(2016, 12, 30)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap();
    let times = (0..nt as i64).map(|i| t0 + TimeDelta::hours(12 * i)).collect();
    let values = Array3::from_shape_fn((nt, 2, 3), |(t, y, x)| 5000.0 + (t * 6 + y * 3 + x) as f64);
    GriddedField::new(times, vec![45.0, -45.0], vec![0.0, 120.0, 240.0], values).unwrap()
}

#[test]
fn field_survives_write_and_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("field.nc");
    let original = field(6);

    write_netcdf(&original, &path, &WriterConfig::default().with_units(Some("m"))).unwrap();
    let back = read_netcdf(&path, &ReaderConfig::default()).unwrap();

    assert_eq!(back, original);

    let file = netcdf::open(&path).unwrap();
    let time = file.variable("time").unwrap();
    let units: String = time
        .attribute_value("units")
        .unwrap()
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(units, "hours since 2016-12-30 00:00:00");
    assert_eq!(time.get_values::<f64, _>(..).unwrap()[..2], [6.0, 18.0]);
}

#[test]
fn custom_variable_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("field.nc");

    let writer = WriterConfig::default().with_var_name("z500");
    write_netcdf(&field(2), &path, &writer).unwrap();

    assert!(matches!(
        read_netcdf(&path, &ReaderConfig::default()),
        Err(IoError::MissingVariable { .. })
    ));
    let back = read_netcdf(&path, &ReaderConfig::default().with_var_name("z500")).unwrap();
    assert_eq!(back.n_times(), 2);
}

#[test]
fn empty_field_not_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.nc");
    let empty = field(3).select_time(0..0).unwrap();

    let err = write_netcdf(&empty, &path, &WriterConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
    assert!(!path.exists());
}

#[test]
fn climatology_written_along_dayofyear() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("climatology.nc");

    // 2016-12-30 06:00 .. 2017-01-01 18:00: ordinals 365, 366, 1
    let config = EvaluateConfig::default().with_require_full_year(false);
    let table = ClimatologyTable::build(&field(6), &config).unwrap();
    write_climatology(&table, &path, &WriterConfig::default()).unwrap();

    let file = netcdf::open(&path).unwrap();
    let days = file.variable("dayofyear").unwrap().get_values::<i32, _>(..).unwrap();
    assert_eq!(days, vec![1, 365, 366]);
    let counts = file.variable("n_samples").unwrap().get_values::<i32, _>(..).unwrap();
    assert_eq!(counts, vec![2, 2, 2]);

    let z = file.variable("z").unwrap();
    let dims: Vec<usize> = z.dimensions().iter().map(|d| d.len()).collect();
    assert_eq!(dims, vec![3, 2, 3]);
    let values = z.get_values::<f64, _>(..).unwrap();
    // day 1 averages t = 4 and 5 at cell (0, 0): 5000 + (24 + 30) / 2
    assert_eq!(values[0], 5027.0);

    let policy: String = file
        .attribute("leap_day_policy")
        .unwrap()
        .value()
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(policy, "separate");
}
