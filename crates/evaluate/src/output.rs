//! JSON output structures for evaluation results.

use crate::error::EvaluateError;
use serde::Serialize;

/// Scores of the naive baselines on one train/test split.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineReport {
    pub lead_steps: usize,
    pub lead_hours: f64,
    pub leap_policy: String,
    pub n_train_times: usize,
    pub n_test_times: usize,
    /// One entry per (baseline, dataset) pair.
    pub scores: Vec<BaselineScore>,
}

impl BaselineReport {
    /// RMSE recorded for `baseline` on `dataset`, if present.
    pub fn rmse(&self, baseline: &str, dataset: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.baseline == baseline && s.dataset == dataset)
            .map(|s| s.rmse)
    }
}

/// RMSE of a single baseline on a single dataset.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineScore {
    /// `persistence`, `climatology` or `constant_climatology`.
    pub baseline: String,
    /// `train` or `test`.
    pub dataset: String,
    pub rmse: f64,
    /// Time entries that entered the score.
    pub n_times: usize,
}

/// Score of an external forecast against ground truth.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastScore {
    pub rmse: f64,
    pub n_times: usize,
    /// Empty unless per-step scores were requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub per_step: Vec<StepScore>,
}

/// RMSE at one timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct StepScore {
    /// ISO 8601 timestamp without timezone.
    pub time: String,
    pub rmse: f64,
}

/// Serialize any output structure to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`EvaluateError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize>(output: &T) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(output).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}
