//! Annealing parameters and stop policy.

use crate::error::{Result, TspError};

/// Temperature floor. The search stops once the temperature drops below it.
pub const MIN_TEMPERATURE: f64 = 1e-200;

/// Temperature schedule for a run.
///
/// Cooling is geometric: after every iteration `T_{k+1} = beta * T_k`.
///
/// # Examples
///
/// ```
/// use tourist::sa::AnnealingParams;
///
/// let params = AnnealingParams::new(10.0, 0.99981).unwrap();
/// assert!(AnnealingParams::new(10.0, 1.0).is_err());
/// # let _ = params;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealingParams {
    /// Initial temperature. Higher values accept more uphill moves early on.
    pub initial_temperature: f64,

    /// Cooling multiplier in (0, 1). Higher = slower cooling.
    pub beta: f64,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            beta: 0.99981,
        }
    }
}

impl AnnealingParams {
    /// Builds validated parameters.
    pub fn new(initial_temperature: f64, beta: f64) -> Result<Self> {
        let params = Self {
            initial_temperature,
            beta,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(TspError::validation(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(TspError::validation(format!(
                "beta must be in (0, 1), got {}",
                self.beta
            )));
        }
        Ok(())
    }
}

/// When to stop a search and how often to report on it.
///
/// The goal and iteration conditions are independent; whichever is met
/// first ends the run. The temperature floor is [`MIN_TEMPERATURE`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopPolicy {
    /// Stop once the current route costs at most this much.
    pub goal_cost: f64,

    /// Hard ceiling on iterations.
    pub max_iterations: usize,

    /// Emit a progress report every this many iterations. Must be non-zero.
    pub report_every: usize,
}

impl Default for StopPolicy {
    fn default() -> Self {
        Self {
            goal_cost: 0.0,
            max_iterations: 1000,
            report_every: 1000,
        }
    }
}

impl StopPolicy {
    /// Builds a validated policy.
    ///
    /// # Errors
    ///
    /// [`TspError::Validation`] if `report_every` is zero or `goal_cost` is NaN.
    pub fn new(goal_cost: f64, max_iterations: usize, report_every: usize) -> Result<Self> {
        let policy = Self {
            goal_cost,
            max_iterations,
            report_every,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_goal_cost(mut self, goal: f64) -> Self {
        self.goal_cost = goal;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_report_every(mut self, n: usize) -> Self {
        self.report_every = n;
        self
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<()> {
        if self.report_every == 0 {
            return Err(TspError::validation("report_every must be at least 1"));
        }
        if self.goal_cost.is_nan() {
            return Err(TspError::validation("goal_cost must not be NaN"));
        }
        Ok(())
    }
}
