//! Isobar evaluation: latitude-weighted RMSE and the naive baselines any
//! learned forecast has to beat.
//!
//! Two baselines are built from observations alone:
//!
//! - **Persistence** relabels the field at time `t` as the forecast for
//!   `t + lead`.
//! - **Climatology** predicts, for each target timestamp, the training mean of
//!   its calendar day-of-year.
//!
//! Both are scored with [`weighted_rmse`], which weights squared errors by
//! `cos(latitude)` normalized to a mean of 1.

mod climatology;
mod config;
mod error;
mod output;
mod persistence;
mod rmse;
mod weights;

use isobar_grid::{GriddedField, align};
use tracing::info;

pub use climatology::{ClimatologyTable, constant_climatology, evaluate_climatology};
pub use config::EvaluateConfig;
pub use error::EvaluateError;
pub use output::{BaselineReport, BaselineScore, ForecastScore, StepScore, to_json};
pub use persistence::persistence_forecast;
pub use rmse::{weighted_rmse, weighted_rmse_per_step};
pub use weights::latitude_weights;

/// Score persistence, day-of-year climatology and constant climatology.
///
/// The climatologies are fit on `train`. Persistence is built from `test`
/// itself and scored on the timestamps it shares with `test`. The
/// day-of-year climatology is also scored on `train` as an in-sample
/// reference.
///
/// # Errors
///
/// Returns [`EvaluateError::Validation`] for an invalid configuration,
/// [`EvaluateError::InvalidLeadSteps`] if the configured lead does
/// not fit the test period, [`EvaluateError::InsufficientData`] if the
/// training period cannot support a climatology, and any error of the
/// individual scores.
pub fn evaluate_baselines(
    train: &GriddedField,
    test: &GriddedField,
    config: &EvaluateConfig,
) -> Result<BaselineReport, EvaluateError> {
    let _span = tracing::info_span!("evaluate_baselines").entered();
    config.validate()?;
    let lead_steps = config.lead_steps();

    let persistence = persistence_forecast(test, lead_steps)?;
    let (persistence, truth) = align(&persistence, test)?;
    let persistence_rmse = weighted_rmse(&persistence, &truth)?;
    let lead_hours = test.cadence()?.hours() * lead_steps as f64;

    let table = ClimatologyTable::build(train, config)?;
    let climatology_test = evaluate_climatology(&table, test)?;
    let climatology_train = evaluate_climatology(&table, train)?;

    let constant = constant_climatology(train, test)?;
    let constant_test = weighted_rmse(&constant, test)?;

    info!(
        lead_steps,
        lead_hours,
        persistence = persistence_rmse,
        climatology = climatology_test,
        constant_climatology = constant_test,
        "baseline scores on test period"
    );

    let score = |baseline: &str, dataset: &str, rmse: f64, n_times: usize| BaselineScore {
        baseline: baseline.to_string(),
        dataset: dataset.to_string(),
        rmse,
        n_times,
    };

    Ok(BaselineReport {
        lead_steps,
        lead_hours,
        leap_policy: config.leap_policy().to_string(),
        n_train_times: train.n_times(),
        n_test_times: test.n_times(),
        scores: vec![
            score("persistence", "test", persistence_rmse, truth.n_times()),
            score("climatology", "test", climatology_test, test.n_times()),
            score("constant_climatology", "test", constant_test, test.n_times()),
            score("climatology", "train", climatology_train, train.n_times()),
        ],
    })
}

/// Score an externally produced forecast against ground truth.
///
/// The two fields are joined on their timestamps first, so a forecast that
/// covers only part of the truth period is scored on the overlap.
///
/// # Errors
///
/// Returns [`EvaluateError::ShapeMismatch`] if the grids differ and
/// [`EvaluateError::EmptyInput`] if the fields share no timestamps.
pub fn score_forecast(
    forecast: &GriddedField,
    truth: &GriddedField,
    per_step: bool,
) -> Result<ForecastScore, EvaluateError> {
    forecast.check_same_grid(truth).map_err(rmse::grid_mismatch)?;
    let (forecast, truth) = align(forecast, truth)?;
    let rmse = weighted_rmse(&forecast, &truth)?;

    let per_step = if per_step {
        weighted_rmse_per_step(&forecast, &truth)?
            .into_iter()
            .zip(truth.times())
            .map(|(rmse, t)| StepScore {
                time: t.format("%Y-%m-%dT%H:%M:%S").to_string(),
                rmse,
            })
            .collect()
    } else {
        Vec::new()
    };

    info!(rmse, n_times = truth.n_times(), "scored forecast");

    Ok(ForecastScore {
        rmse,
        n_times: truth.n_times(),
        per_step,
    })
}
