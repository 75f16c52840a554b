use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Isobar configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsobarConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Year ranges of the train/validation/test split.
    #[serde(default)]
    pub split: SplitToml,

    /// Baseline and scoring settings.
    #[serde(default)]
    pub evaluate: EvaluateToml,

    /// Training-data preparation settings.
    #[serde(default)]
    pub prepare: PrepareToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    /// Observation files, e.g. one per year.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    #[serde(default = "default_var_name")]
    pub var_name: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    /// Latitude coordinate names to try, replacing `lat`/`latitude`.
    #[serde(default)]
    pub lat_names: Option<Vec<String>>,
    /// Longitude coordinate names to try, replacing `lon`/`longitude`.
    #[serde(default)]
    pub lon_names: Option<Vec<String>>,
    #[serde(default = "default_one")]
    pub time_stride: usize,
    /// Units attribute written to output files.
    #[serde(default)]
    pub units: Option<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            var_name: default_var_name(),
            time_var: default_time_var(),
            lat_names: None,
            lon_names: None,
            time_stride: default_one(),
            units: None,
        }
    }
}

fn default_var_name() -> String {
    "z".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_one() -> usize {
    1
}

/// Inclusive `[start, end]` year ranges.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitToml {
    #[serde(default = "default_train_years")]
    pub train: [i32; 2],
    #[serde(default = "default_validation_years")]
    pub validation: [i32; 2],
    #[serde(default = "default_test_years")]
    pub test: [i32; 2],
}

impl Default for SplitToml {
    fn default() -> Self {
        Self {
            train: default_train_years(),
            validation: default_validation_years(),
            test: default_test_years(),
        }
    }
}

fn default_train_years() -> [i32; 2] {
    [1979, 2015]
}
fn default_validation_years() -> [i32; 2] {
    [2016, 2016]
}
fn default_test_years() -> [i32; 2] {
    [2017, 2018]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateToml {
    #[serde(default = "default_lead_steps")]
    pub lead_steps: usize,
    #[serde(default = "default_leap_policy")]
    pub leap_policy: String,
    #[serde(default = "default_true")]
    pub require_full_year: bool,
}

impl Default for EvaluateToml {
    fn default() -> Self {
        Self {
            lead_steps: default_lead_steps(),
            leap_policy: default_leap_policy(),
            require_full_year: true,
        }
    }
}

fn default_lead_steps() -> usize {
    10
}
fn default_leap_policy() -> String {
    "separate".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrepareToml {
    pub out_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub write_climatology: bool,
}

impl Default for PrepareToml {
    fn default() -> Self {
        Self {
            out_dir: None,
            write_climatology: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: IsobarConfig = toml::from_str("").unwrap();
        assert!(config.io.inputs.is_empty());
        assert_eq!(config.io.var_name, "z");
        assert_eq!(config.split.train, [1979, 2015]);
        assert_eq!(config.split.test, [2017, 2018]);
        assert_eq!(config.evaluate.lead_steps, 10);
        assert_eq!(config.evaluate.leap_policy, "separate");
        assert!(config.prepare.write_climatology);
    }

    #[test]
    fn sections_parse() {
        let config: IsobarConfig = toml::from_str(
            r#"
            [io]
            inputs = ["z500_2016.nc", "z500_2017.nc"]
            time_stride = 12
            lat_names = ["y"]

            [split]
            train = [2000, 2010]

            [evaluate]
            lead_steps = 6
            leap_policy = "fold_into_365"
            "#,
        )
        .unwrap();
        assert_eq!(config.io.inputs.len(), 2);
        assert_eq!(config.io.time_stride, 12);
        assert_eq!(config.io.lat_names, Some(vec!["y".to_string()]));
        assert!(config.io.lon_names.is_none());
        assert_eq!(config.split.train, [2000, 2010]);
        assert_eq!(config.split.validation, [2016, 2016]);
        assert_eq!(config.evaluate.lead_steps, 6);
        assert!(config.evaluate.require_full_year);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(toml::from_str::<IsobarConfig>("[evaluate]\nlead = 3").is_err());
    }
}
