//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Time-based**: SPT, LPT, WSPT
//! - **Date-based**: EDD, ERD
//! - **Identifier**: Wrap-Around
//!
//! # Score Convention
//! All rules return lower scores for higher priority jobs.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3
//! - Smith (1956), "Various optimizers for single-stage production"

use super::{DispatchingRule, RuleScore};
use crate::error::{Result, ScheduleError};
use crate::models::{Job, COL_RELEASE_DATE};

// ======================== Time-based rules ========================

/// Shortest Processing Time.
///
/// Minimizes total completion time on a single machine.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, job: &Job) -> Result<RuleScore> {
        Ok(job.process_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
///
/// Useful for load balancing in parallel machine environments.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, job: &Job) -> Result<RuleScore> {
        Ok(-job.process_time)
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Weighted Shortest Processing Time.
///
/// Scores by `process_time / weight`. Weights are validated positive when
/// the job set is built.
///
/// # Reference
/// Smith (1956), optimal for minimizing weighted completion time.
#[derive(Debug, Clone, Copy)]
pub struct Wspt;

impl DispatchingRule for Wspt {
    fn name(&self) -> &'static str {
        "WSPT"
    }

    fn evaluate(&self, job: &Job) -> Result<RuleScore> {
        Ok(job.wspt_ratio())
    }

    fn description(&self) -> &'static str {
        "Weighted Shortest Processing Time"
    }
}

// ======================== Date-based rules ========================

/// Earliest Due Date.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, job: &Job) -> Result<RuleScore> {
        Ok(job.due_date)
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Earliest Release Date.
///
/// Requires every job to carry a release date.
#[derive(Debug, Clone, Copy)]
pub struct Erd;

impl DispatchingRule for Erd {
    fn name(&self) -> &'static str {
        "ERD"
    }

    fn evaluate(&self, job: &Job) -> Result<RuleScore> {
        job.release_date.ok_or_else(|| {
            ScheduleError::missing(COL_RELEASE_DATE, format!("job {} has none (ERD)", job.id))
        })
    }

    fn description(&self) -> &'static str {
        "Earliest Release Date"
    }
}

// ======================== Identifier rule ========================

/// Wrap-Around.
///
/// Orders by ascending job identifier. The assignment simulator deals the
/// resulting sequence round-robin across machines.
#[derive(Debug, Clone, Copy)]
pub struct WrapAround;

impl DispatchingRule for WrapAround {
    fn name(&self) -> &'static str {
        "Wrap-Around"
    }

    fn evaluate(&self, job: &Job) -> Result<RuleScore> {
        Ok(job.id.0 as f64)
    }

    fn description(&self) -> &'static str {
        "Wrap-Around (identifier order)"
    }
}
