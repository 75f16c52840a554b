use chrono::{Datelike, NaiveDate, TimeDelta};
use isobar_calendar::{Cadence, Doy, LeapDayPolicy};

/// Walks every day of `year` and returns the sequence of day-of-year values.
fn doys_for_year(year: i32, policy: LeapDayPolicy) -> Vec<u16> {
    let mut day = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let mut out = Vec::new();
    while day.year() == year {
        out.push(Doy::from_date(&day, policy).get());
        day = day.succ_opt().unwrap();
    }
    out
}

#[test]
fn common_year_covers_1_to_365() {
    for policy in [LeapDayPolicy::Separate, LeapDayPolicy::FoldInto365] {
        let doys = doys_for_year(2017, policy);
        assert_eq!(doys, (1..=365).collect::<Vec<u16>>(), "policy {policy}");
    }
}

#[test]
fn leap_year_separate_covers_1_to_366() {
    let doys = doys_for_year(2016, LeapDayPolicy::Separate);
    assert_eq!(doys, (1..=366).collect::<Vec<u16>>());
}

#[test]
fn leap_year_fold_repeats_365() {
    let doys = doys_for_year(2016, LeapDayPolicy::FoldInto365);
    assert_eq!(doys.len(), 366);
    assert_eq!(doys[364], 365);
    assert_eq!(doys[365], 365);
    assert_eq!(*doys.iter().max().unwrap(), 365);
}

#[test]
fn feb_29_shares_bucket_with_common_year_march_1() {
    let feb29 = NaiveDate::from_ymd_opt(2016, 2, 29).unwrap();
    let mar1 = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();
    for policy in [LeapDayPolicy::Separate, LeapDayPolicy::FoldInto365] {
        assert_eq!(Doy::from_date(&feb29, policy), Doy::from_date(&mar1, policy));
        assert_eq!(Doy::from_date(&feb29, policy).get(), 60);
    }
}

#[test]
fn twelve_hourly_axis_over_a_year_boundary() {
    let start = NaiveDate::from_ymd_opt(2016, 12, 31)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let times: Vec<_> = (0..4).map(|i| start + TimeDelta::hours(12 * i)).collect();

    let cadence = Cadence::infer(&times).unwrap();
    assert_eq!(cadence.hours(), 12.0);

    let doys: Vec<u16> = times
        .iter()
        .map(|t| Doy::from_date(t, LeapDayPolicy::Separate).get())
        .collect();
    assert_eq!(doys, vec![366, 366, 1, 1]);
}
