//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use crate::config::*;

use isobar_calendar::{DataSplit, LeapDayPolicy, YearRange};
use isobar_evaluate::EvaluateConfig;
use isobar_io::{ReaderConfig, WriterConfig};

/// Parses a leap-day policy name into the corresponding enum variant.
pub fn parse_leap_policy(s: &str) -> Result<LeapDayPolicy> {
    s.parse().with_context(|| {
        format!("unknown leap policy: {s:?} (expected \"separate\" or \"fold_into_365\")")
    })
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoConfig) -> Result<ReaderConfig> {
    let mut cfg = ReaderConfig::default()
        .with_var_name(&io.var_name)
        .with_time_var(&io.time_var)
        .with_time_stride(io.time_stride);
    if let Some(names) = &io.lat_names {
        cfg = cfg.with_lat_aliases(names.clone());
    }
    if let Some(names) = &io.lon_names {
        cfg = cfg.with_lon_aliases(names.clone());
    }
    cfg.validate().context("invalid [io] section")?;
    Ok(cfg)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoConfig) -> WriterConfig {
    WriterConfig::default()
        .with_var_name(&io.var_name)
        .with_units(io.units.as_deref())
}

/// Builds a [`DataSplit`] from the TOML year ranges.
pub fn build_split(split: &SplitToml) -> Result<DataSplit> {
    let range = |name: &str, [start, end]: [i32; 2]| {
        YearRange::new(start, end).with_context(|| format!("invalid [split].{name} years"))
    };
    let split = DataSplit::new(
        range("train", split.train)?,
        range("validation", split.validation)?,
        range("test", split.test)?,
    )
    .context("invalid [split] section")?;
    Ok(split)
}

/// Builds an [`EvaluateConfig`] from the TOML evaluate section, with an
/// optional CLI override of the lead.
pub fn build_evaluate_config(
    eval: &EvaluateToml,
    lead_override: Option<usize>,
) -> Result<EvaluateConfig> {
    let lead_steps = lead_override.unwrap_or(eval.lead_steps);
    let cfg = EvaluateConfig::default()
        .with_lead_steps(lead_steps)
        .with_leap_policy(parse_leap_policy(&eval.leap_policy)?)
        .with_require_full_year(eval.require_full_year);
    cfg.validate().context("invalid [evaluate] section")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_policy_names() {
        assert_eq!(parse_leap_policy("separate").unwrap(), LeapDayPolicy::Separate);
        assert_eq!(parse_leap_policy("Fold_Into_365").unwrap(), LeapDayPolicy::FoldInto365);
        assert!(parse_leap_policy("drop").is_err());
    }

    #[test]
    fn default_split() {
        let split = build_split(&SplitToml::default()).unwrap();
        assert_eq!(split.train().start(), 1979);
        assert_eq!(split.validation(), YearRange::single(2016));
        assert_eq!(split.test().end(), 2018);
    }

    #[test]
    fn overlapping_split_rejected() {
        let toml = SplitToml {
            train: [2000, 2016],
            ..SplitToml::default()
        };
        assert!(build_split(&toml).is_err());
    }

    #[test]
    fn lead_override() {
        let eval = EvaluateToml::default();
        assert_eq!(build_evaluate_config(&eval, None).unwrap().lead_steps(), 10);
        assert_eq!(build_evaluate_config(&eval, Some(6)).unwrap().lead_steps(), 6);
        assert!(build_evaluate_config(&eval, Some(0)).is_err());
    }

    #[test]
    fn reader_config_validated() {
        let io = IoConfig {
            time_stride: 0,
            ..IoConfig::default()
        };
        assert!(build_reader_config(&io).is_err());
    }

    #[test]
    fn empty_coordinate_names_rejected() {
        let io = IoConfig {
            lon_names: Some(Vec::new()),
            ..IoConfig::default()
        };
        let err = build_reader_config(&io).unwrap_err();
        assert!(format!("{err:#}").contains("at least one alias"), "{err:#}");
    }
}
