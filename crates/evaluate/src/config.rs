//! Evaluation configuration.

use isobar_calendar::LeapDayPolicy;

use crate::error::EvaluateError;

/// Configuration for baseline construction and scoring.
#[derive(Debug, Clone)]
pub struct EvaluateConfig {
    lead_steps: usize,
    leap_policy: LeapDayPolicy,
    require_full_year: bool,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            lead_steps: 10,
            leap_policy: LeapDayPolicy::Separate,
            require_full_year: true,
        }
    }
}

impl EvaluateConfig {
    /// Set the forecast lead in time steps.
    pub fn with_lead_steps(mut self, lead_steps: usize) -> Self {
        self.lead_steps = lead_steps;
        self
    }

    /// Set how day 366 of leap years is grouped in the climatology.
    pub fn with_leap_policy(mut self, policy: LeapDayPolicy) -> Self {
        self.leap_policy = policy;
        self
    }

    /// Require every day 1..=365 to have training data.
    pub fn with_require_full_year(mut self, require: bool) -> Self {
        self.require_full_year = require;
        self
    }

    /// Returns the forecast lead in time steps.
    pub fn lead_steps(&self) -> usize {
        self.lead_steps
    }

    /// Returns the leap-day policy.
    pub fn leap_policy(&self) -> LeapDayPolicy {
        self.leap_policy
    }

    /// Returns whether a full annual cycle is required.
    pub fn require_full_year(&self) -> bool {
        self.require_full_year
    }

    /// Validates this configuration.
    ///
    /// The upper bound of the lead depends on the data and is checked when
    /// the persistence forecast is built.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Validation`] if the lead is zero.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if self.lead_steps == 0 {
            return Err(EvaluateError::Validation {
                count: 1,
                details: "lead_steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
