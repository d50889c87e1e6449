//! Input validation for scheduling problems.
//!
//! Checks structural integrity of job data before scheduling. Detects:
//! - Duplicate job IDs
//! - Non-positive or non-finite processing times
//! - Non-positive or non-finite weights
//! - Non-finite due and release dates
//!
//! Also provides the permutation check every simulation runs on its input
//! sequence.

use std::collections::HashSet;

use crate::error::{Result, ScheduleError};
use crate::models::{Job, JobId, JobSet};

/// Validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// Processing time is zero or negative.
    NonPositiveProcessTime,
    /// Weight is zero or negative. WSPT is undefined for such a job.
    NonPositiveWeight,
    /// An attribute is NaN or infinite.
    NonFiniteValue,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates job data.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. Every processing time is finite and positive
/// 3. Every weight is finite and positive
/// 4. Due and release dates are finite
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if !ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if !job.process_time.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Job {} has non-finite process time", job.id),
            ));
        } else if job.process_time <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveProcessTime,
                format!("Job {} has process time {}", job.id, job.process_time),
            ));
        }

        if !job.weight.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Job {} has non-finite weight", job.id),
            ));
        } else if job.weight <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveWeight,
                format!("Job {} has weight {}", job.id, job.weight),
            ));
        }

        let dates_finite =
            job.due_date.is_finite() && job.release_date.map_or(true, f64::is_finite);
        if !dates_finite {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteValue,
                format!("Job {} has a non-finite due or release date", job.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fails with `SequenceMismatch` unless `sequence` lists every job of
/// `jobs` exactly once and nothing else.
pub fn check_permutation(sequence: &[JobId], jobs: &JobSet) -> Result<()> {
    if sequence.len() != jobs.len() {
        return Err(ScheduleError::SequenceMismatch(format!(
            "sequence has {} entries, job set has {}",
            sequence.len(),
            jobs.len()
        )));
    }

    let mut seen = HashSet::with_capacity(sequence.len());
    for &id in sequence {
        if !jobs.contains(id) {
            return Err(ScheduleError::SequenceMismatch(format!("unknown job {id}")));
        }
        if !seen.insert(id) {
            return Err(ScheduleError::SequenceMismatch(format!("job {id} appears twice")));
        }
    }
    Ok(())
}
