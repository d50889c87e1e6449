//! Job sequence (permutation) model.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{JobId, JobSet};
use crate::error::Result;
use crate::validation::check_permutation;

/// An ordered permutation of job ids.
///
/// Two sequences holding the same jobs in different order are different
/// solutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<JobId>);

impl Sequence {
    /// Wraps an ordered list of ids. Use [`Sequence::validate_against`] to
    /// check it is a permutation of a job set.
    pub fn new(ids: Vec<JobId>) -> Self {
        Self(ids)
    }

    /// Ids in order.
    pub fn as_slice(&self) -> &[JobId] {
        &self.0
    }

    /// Iterates ids in order.
    pub fn iter(&self) -> impl Iterator<Item = &JobId> {
        self.0.iter()
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 0-based position of a job.
    pub fn position(&self, id: JobId) -> Option<usize> {
        self.0.iter().position(|&j| j == id)
    }

    /// Returns a copy with positions `i` and `j` exchanged.
    pub fn swapped(&self, i: usize, j: usize) -> Self {
        let mut ids = self.0.clone();
        ids.swap(i, j);
        Self(ids)
    }

    /// Fails with `SequenceMismatch` unless this is an exact permutation of
    /// the job set's ids.
    pub fn validate_against(&self, jobs: &JobSet) -> Result<()> {
        check_permutation(&self.0, jobs)
    }

    /// Consumes the sequence.
    pub fn into_inner(self) -> Vec<JobId> {
        self.0
    }
}

impl From<Vec<JobId>> for Sequence {
    fn from(ids: Vec<JobId>) -> Self {
        Self(ids)
    }
}

impl FromIterator<JobId> for Sequence {
    fn from_iter<I: IntoIterator<Item = JobId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::models::Job;

    fn ids(raw: &[u32]) -> Sequence {
        raw.iter().copied().map(JobId).collect()
    }

    fn jobs() -> JobSet {
        JobSet::new(vec![
            Job::new(1, 1.0, 1.0),
            Job::new(2, 1.0, 1.0),
            Job::new(3, 1.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(ids(&[2, 1, 3]).to_string(), "[2, 1, 3]");
        assert_eq!(Sequence::default().to_string(), "[]");
    }

    #[test]
    fn test_swapped_leaves_original() {
        let s = ids(&[1, 2, 3]);
        let t = s.swapped(0, 2);
        assert_eq!(t, ids(&[3, 2, 1]));
        assert_eq!(s, ids(&[1, 2, 3]));
        assert_eq!(t.position(JobId(3)), Some(0));
        assert_eq!(t.into_inner(), vec![JobId(3), JobId(2), JobId(1)]);
    }

    #[test]
    fn test_validate_permutation() {
        let set = jobs();
        assert!(ids(&[3, 1, 2]).validate_against(&set).is_ok());

        for bad in [&[1, 2][..], &[1, 2, 2], &[1, 2, 4], &[1, 2, 3, 1]] {
            let err = ids(bad).validate_against(&set).unwrap_err();
            assert!(matches!(err, ScheduleError::SequenceMismatch(_)), "{bad:?}");
        }
    }
}
