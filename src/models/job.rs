//! Job model and job set.
//!
//! A job is a single unit of work processed once per machine it visits.
//! The job set owns every job for one scheduling session and is read-only
//! after construction.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, ScheduleError};
use crate::validation::validate_jobs;

/// Time unit used throughout the engine.
///
/// The consumer defines the unit (minutes, hours, shifts). All values are
/// relative to a schedule start at t=0.
pub type Time = f64;

/// Job identifier.
///
/// Unique within a job set and stable across every sequence. Ordering is
/// numeric, which is what the Wrap-Around rule sorts by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for JobId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A job to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Processing time on each machine it visits.
    pub process_time: Time,
    /// Due date. May lie before or after any completion time.
    pub due_date: Time,
    /// Importance weight (default 1).
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Release date. Only the ERD rule reads it.
    #[serde(default)]
    pub release_date: Option<Time>,
}

fn default_weight() -> f64 {
    1.0
}

impl Job {
    /// Creates a job with weight 1 and no release date.
    pub fn new(id: impl Into<JobId>, process_time: Time, due_date: Time) -> Self {
        Self {
            id: id.into(),
            process_time,
            due_date,
            weight: default_weight(),
            release_date: None,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the release date.
    pub fn with_release_date(mut self, release_date: Time) -> Self {
        self.release_date = Some(release_date);
        self
    }

    /// Processing time per unit weight (the WSPT key).
    #[inline]
    pub fn wspt_ratio(&self) -> f64 {
        self.process_time / self.weight
    }
}

/// Validated, insertion-ordered collection of jobs.
///
/// Insertion order carries no scheduling meaning; it is only the stable
/// tie-break when a dispatching rule scores two jobs equally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Job>", into = "Vec<Job>")]
pub struct JobSet {
    jobs: Vec<Job>,
    index: HashMap<JobId, usize>,
}

impl JobSet {
    /// Builds a job set, rejecting duplicate ids and invalid attributes.
    pub fn new(jobs: Vec<Job>) -> Result<Self> {
        validate_jobs(&jobs).map_err(ScheduleError::InvalidJobSet)?;
        let index = jobs.iter().enumerate().map(|(i, j)| (j.id, i)).collect();
        Ok(Self { jobs, index })
    }

    /// Looks up a job.
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.index.get(&id).map(|&i| &self.jobs[i])
    }

    /// Looks up a job that a sequence refers to.
    pub(crate) fn require(&self, id: JobId) -> Result<&Job> {
        self.get(id)
            .ok_or_else(|| ScheduleError::SequenceMismatch(format!("unknown job {id}")))
    }

    /// Whether the set contains the id.
    pub fn contains(&self, id: JobId) -> bool {
        self.index.contains_key(&id)
    }

    /// Jobs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Jobs as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Job] {
        &self.jobs
    }

    /// Job ids in insertion order.
    pub fn ids(&self) -> Vec<JobId> {
        self.jobs.iter().map(|j| j.id).collect()
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the set has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Sum of all processing times.
    pub fn total_process_time(&self) -> Time {
        self.jobs.iter().map(|j| j.process_time).sum()
    }
}

impl TryFrom<Vec<Job>> for JobSet {
    type Error = ScheduleError;

    fn try_from(jobs: Vec<Job>) -> Result<Self> {
        Self::new(jobs)
    }
}

impl From<JobSet> for Vec<Job> {
    fn from(set: JobSet) -> Self {
        set.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new(7, 4.0, 10.0)
            .with_weight(2.0)
            .with_release_date(1.0);

        assert_eq!(job.id, JobId(7));
        assert_eq!(job.process_time, 4.0);
        assert_eq!(job.due_date, 10.0);
        assert_eq!(job.weight, 2.0);
        assert_eq!(job.release_date, Some(1.0));
        assert!((job.wspt_ratio() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_default_weight() {
        let job = Job::new(1, 3.0, 5.0);
        assert_eq!(job.weight, 1.0);
        assert_eq!(job.release_date, None);
    }

    #[test]
    fn test_job_set_lookup() {
        let set = JobSet::new(vec![Job::new(2, 1.0, 1.0), Job::new(1, 3.0, 2.0)]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.ids(), vec![JobId(2), JobId(1)]);
        assert_eq!(set.get(JobId(1)).unwrap().process_time, 3.0);
        assert!(set.get(JobId(9)).is_none());
        assert!(set.require(JobId(9)).is_err());
        assert_eq!(set.total_process_time(), 4.0);
    }

    #[test]
    fn test_job_set_rejects_duplicates() {
        let err = JobSet::new(vec![Job::new(1, 1.0, 1.0), Job::new(1, 2.0, 1.0)]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidJobSet(_)));
    }

    #[test]
    fn test_job_set_serde() {
        let json = r#"[
            {"id": 1, "process_time": 4.0, "due_date": 5.0},
            {"id": 2, "process_time": 2.0, "due_date": 3.0, "weight": 2.0, "release_date": 1.0}
        ]"#;
        let set: JobSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.get(JobId(1)).unwrap().weight, 1.0);
        assert_eq!(set.get(JobId(2)).unwrap().release_date, Some(1.0));

        let back = serde_json::to_string(&set).unwrap();
        let again: JobSet = serde_json::from_str(&back).unwrap();
        assert_eq!(again.ids(), set.ids());
    }

    #[test]
    fn test_job_set_serde_rejects_invalid() {
        let json = r#"[{"id": 1, "process_time": -1.0, "due_date": 5.0}]"#;
        assert!(serde_json::from_str::<JobSet>(json).is_err());
    }
}
