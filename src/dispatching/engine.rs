//! Sequencer: applies one dispatching rule to a job set.
//!
//! Scores every job, then stable-sorts by score so that ties keep the job
//! set's insertion order.

use super::{DispatchRule, RuleScore};
use crate::error::Result;
use crate::models::{JobId, JobSet, Sequence};

/// Builds sequences under a fixed dispatching rule.
///
/// # Example
/// ```
/// use u_shop::dispatching::{DispatchRule, Sequencer};
/// use u_shop::models::{Job, JobId, JobSet};
///
/// let jobs = JobSet::new(vec![
///     Job::new(1, 4.0, 5.0),
///     Job::new(2, 2.0, 3.0).with_weight(2.0),
/// ]).unwrap();
///
/// let scored = Sequencer::new(DispatchRule::Wspt).score(&jobs).unwrap();
/// assert_eq!(scored[0], (JobId(2), 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    rule: DispatchRule,
}

impl Sequencer {
    /// Creates a sequencer for `rule`.
    pub fn new(rule: DispatchRule) -> Self {
        Self { rule }
    }

    /// The rule this sequencer applies.
    pub fn rule(&self) -> DispatchRule {
        self.rule
    }

    /// Jobs with their rule scores, in sequence order.
    ///
    /// For WSPT the score is the `process_time / weight` ratio; it exists
    /// only in this result and is never written back to the job.
    pub fn score(&self, jobs: &JobSet) -> Result<Vec<(JobId, RuleScore)>> {
        let resolver = self.rule.resolver();
        let mut scored = jobs
            .iter()
            .map(|job| Ok((job.id, resolver.evaluate(job)?)))
            .collect::<Result<Vec<_>>>()?;

        // `sort_by` is stable: equal scores keep insertion order.
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(scored)
    }

    /// Sequences the job set.
    pub fn sequence(&self, jobs: &JobSet) -> Result<Sequence> {
        Ok(self.score(jobs)?.into_iter().map(|(id, _)| id).collect())
    }
}

/// Sequences `jobs` under `rule`.
pub fn sequence(jobs: &JobSet, rule: DispatchRule) -> Result<Sequence> {
    Sequencer::new(rule).sequence(jobs)
}
