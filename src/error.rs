//! Engine error type.
//!
//! Every failure is raised at the point of detection and returned to the
//! caller unchanged. No operation returns partial results on error.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by the scheduling engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Unrecognized dispatching-rule name, or a rule not defined for the
    /// selected shop model.
    #[error("invalid dispatching rule: {0}")]
    InvalidRule(String),

    /// The job table lacks a column (or a job lacks a value) required by the
    /// requested rule or objective.
    #[error("missing attribute '{attribute}': {reason}")]
    MissingAttribute {
        /// Column or field name.
        attribute: String,
        /// Where it was needed.
        reason: String,
    },

    /// A sequence is not an exact permutation of the job set.
    #[error("sequence mismatch: {0}")]
    SequenceMismatch(String),

    /// Machine count is zero or negative, or not allowed for the shop model.
    #[error("invalid machine count: {0}")]
    InvalidMachineCount(i64),

    /// Unrecognized improvement method name.
    #[error("unknown improvement method: {0}")]
    UnknownMethod(String),

    /// Negative or absent threshold for the metaheuristic.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Job data failed integrity checks.
    #[error("invalid job set: {}", summarize(.0))]
    InvalidJobSet(Vec<ValidationError>),
}

impl ScheduleError {
    pub(crate) fn missing(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;
