//! Schedule objective metrics.
//!
//! Reduces a completion record to seven scalar objectives, always computed
//! together.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | max C_j |
//! | Total completion time | Σ C_j |
//! | Total tardiness | Σ max(0, C_j − d_j) |
//! | Total weighted completion | Σ w_j·C_j |
//! | Total lateness (U_j) | number of jobs with C_j > d_j |
//! | Total weighted lateness | Σ w_j·U_j |
//! | Total weighted tardiness | Σ w_j·T_j |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 2.3: Objectives

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{CompletionRecord, JobSet, Sequence, Time};

/// Report label for each objective, in report order.
pub const OBJECTIVE_LABELS: [&str; 7] = [
    "Makespan",
    "Total completion time",
    "Total tardiness",
    "Total weighted completion",
    "Total lateness (Uj)",
    "Total weighted lateness (WjUj)",
    "Total weighted tardiness (WjTj)",
];

/// The seven objective values of one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectiveResult {
    /// Latest completion time.
    pub makespan: Time,
    /// Sum of completion times.
    pub total_completion_time: Time,
    /// Sum of tardiness.
    pub total_tardiness: Time,
    /// Sum of weight × completion time.
    pub weighted_completion: f64,
    /// Number of late jobs.
    pub total_lateness: usize,
    /// Sum of weights of late jobs.
    pub weighted_lateness: f64,
    /// Sum of weight × tardiness.
    pub weighted_tardiness: f64,
}

impl ObjectiveResult {
    /// Evaluates `record`, produced by simulating `sequence` over `jobs`.
    ///
    /// Fails with `SequenceMismatch` if the sequence is not a permutation of
    /// the job set or the record lacks one of its jobs.
    pub fn calculate(
        jobs: &JobSet,
        sequence: &Sequence,
        record: &CompletionRecord,
    ) -> Result<Self> {
        sequence.validate_against(jobs)?;
        let mut result = Self::default();

        for &job_id in sequence.iter() {
            let job = jobs.require(job_id)?;
            let completion = record.completion_time(job_id).ok_or_else(|| {
                ScheduleError::SequenceMismatch(format!("no completion recorded for job {job_id}"))
            })?;

            let tardiness = (completion - job.due_date).max(0.0);
            let late = completion > job.due_date;

            result.makespan = result.makespan.max(completion);
            result.total_completion_time += completion;
            result.total_tardiness += tardiness;
            result.weighted_completion += completion * job.weight;
            result.weighted_tardiness += job.weight * tardiness;
            if late {
                result.total_lateness += 1;
                result.weighted_lateness += job.weight;
            }
        }

        Ok(result)
    }

    /// (label, value) pairs in report order.
    pub fn rows(&self) -> [(&'static str, f64); 7] {
        [
            (OBJECTIVE_LABELS[0], self.makespan),
            (OBJECTIVE_LABELS[1], self.total_completion_time),
            (OBJECTIVE_LABELS[2], self.total_tardiness),
            (OBJECTIVE_LABELS[3], self.weighted_completion),
            (OBJECTIVE_LABELS[4], self.total_lateness as f64),
            (OBJECTIVE_LABELS[5], self.weighted_lateness),
            (OBJECTIVE_LABELS[6], self.weighted_tardiness),
        ]
    }
}
