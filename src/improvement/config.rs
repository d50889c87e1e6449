//! Improvement loop configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Parameters of the improvement loop.
///
/// # Example
/// ```
/// use u_shop::improvement::ImproverConfig;
///
/// let config = ImproverConfig::default()
///     .with_iterations(200)
///     .with_initial_threshold(5.0);
/// assert_eq!(config.threshold_decay, 0.95);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImproverConfig {
    /// Number of neighborhood moves per run. No early stopping.
    pub iterations: usize,
    /// Starting width of the acceptance band (metaheuristic only).
    pub initial_threshold: f64,
    /// Factor applied to the threshold after every iteration.
    pub threshold_decay: f64,
}

impl Default for ImproverConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            initial_threshold: 0.0,
            threshold_decay: 0.95,
        }
    }
}

impl ImproverConfig {
    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the initial threshold.
    pub fn with_initial_threshold(mut self, threshold: f64) -> Self {
        self.initial_threshold = threshold;
        self
    }

    /// Sets the per-iteration threshold decay factor.
    pub fn with_threshold_decay(mut self, decay: f64) -> Self {
        self.threshold_decay = decay;
        self
    }

    /// Fails with `InvalidThreshold` for a negative or non-finite threshold,
    /// or a decay factor outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_threshold.is_finite() || self.initial_threshold < 0.0 {
            return Err(ScheduleError::InvalidThreshold(format!(
                "threshold must be a non-negative number, got {}",
                self.initial_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold_decay) {
            return Err(ScheduleError::InvalidThreshold(format!(
                "decay must lie in [0, 1], got {}",
                self.threshold_decay
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ImproverConfig::default();
        assert_eq!(c.iterations, 500);
        assert_eq!(c.initial_threshold, 0.0);
        assert_eq!(c.threshold_decay, 0.95);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ImproverConfig::default()
            .with_initial_threshold(-1.0)
            .validate()
            .is_err());
        assert!(ImproverConfig::default()
            .with_initial_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(ImproverConfig::default()
            .with_threshold_decay(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json() {
        let c: ImproverConfig = serde_json::from_str(r#"{"iterations": 50}"#).unwrap();
        assert_eq!(c.iterations, 50);
        assert_eq!(c.threshold_decay, 0.95);
    }
}
