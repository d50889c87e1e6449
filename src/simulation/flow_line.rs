//! Permutation flow-shop simulator.
//!
//! # Algorithm
//!
//! With `C[m][i]` the completion of the job at position `i` on machine `m`:
//!
//! ```text
//! C[m][i] = p(i) + max(C[m-1][i], C[m][i-1]),   C[0][*] = C[*][0] = 0
//! ```
//!
//! evaluated over a zero-padded `(M+1) x (N+1)` table in increasing position,
//! then increasing machine order.
//!
//! # Complexity
//! O(n * m) time and space.
//!
//! # Reference
//! Johnson (1954), "Optimal two- and three-stage production schedules"

use crate::error::Result;
use crate::models::{CompletionRecord, JobCompletion, JobSet, Operation, Sequence, Time};

/// Simulates a permutation already validated against `jobs`.
pub(super) fn simulate(
    machine_count: usize,
    jobs: &JobSet,
    sequence: &Sequence,
) -> Result<CompletionRecord> {
    let mut table: Vec<Vec<Time>> = vec![vec![0.0; sequence.len() + 1]; machine_count + 1];
    let mut entries = Vec::with_capacity(sequence.len());

    for (i, &job_id) in sequence.iter().enumerate() {
        let process_time = jobs.require(job_id)?.process_time;
        let col = i + 1;
        let mut operations = Vec::with_capacity(machine_count);

        for m in 1..=machine_count {
            let start = table[m - 1][col].max(table[m][col - 1]);
            let end = start + process_time;
            table[m][col] = end;
            operations.push(Operation::new(m - 1, start, end));
        }

        entries.push(JobCompletion { job_id, operations });
    }

    Ok(CompletionRecord::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, JobId};
    use proptest::prelude::*;

    fn seq(raw: &[u32]) -> Sequence {
        raw.iter().copied().map(JobId).collect()
    }

    #[test]
    fn test_two_jobs_two_machines() {
        let jobs = JobSet::new(vec![Job::new(1, 3.0, 0.0), Job::new(2, 5.0, 0.0)]).unwrap();
        let r = simulate(2, &jobs, &seq(&[1, 2])).unwrap();

        assert_eq!(r.machine_completions(JobId(1)), Some(vec![3.0, 6.0]));
        assert_eq!(r.machine_completions(JobId(2)), Some(vec![8.0, 13.0]));
        assert_eq!(r.completion_time(JobId(2)), Some(13.0));
        assert_eq!(r.makespan(), 13.0);
    }

    #[test]
    fn test_machine_waits_for_previous_stage() {
        // J2 on machine 2 starts at max(6, 8) = 8
        let jobs = JobSet::new(vec![Job::new(1, 3.0, 0.0), Job::new(2, 5.0, 0.0)]).unwrap();
        let r = simulate(2, &jobs, &seq(&[1, 2])).unwrap();
        let ops = &r.get(JobId(2)).unwrap().operations;
        assert_eq!((ops[1].machine, ops[1].start), (1, 8.0));
    }

    #[test]
    fn test_order_matters() {
        let jobs = JobSet::new(vec![
            Job::new(1, 3.0, 0.0),
            Job::new(2, 5.0, 0.0),
            Job::new(3, 1.0, 0.0),
        ])
        .unwrap();
        let a = simulate(3, &jobs, &seq(&[1, 2, 3])).unwrap();
        let b = simulate(3, &jobs, &seq(&[3, 1, 2])).unwrap();
        // 3+5+5+5+1 = 19 vs 1+3+5+5+5 = 19 → same makespan, different completions
        assert_eq!(a.makespan(), 19.0);
        assert_eq!(b.makespan(), 19.0);
        assert_ne!(a.completion_time(JobId(3)), b.completion_time(JobId(3)));
    }

    #[test]
    fn test_empty_sequence() {
        let jobs = JobSet::new(Vec::new()).unwrap();
        let r = simulate(3, &jobs, &Sequence::default()).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.makespan(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_one_machine_is_cumulative_sum(
            times in prop::collection::vec(0.1f64..20.0, 1..30)
        ) {
            let jobs = JobSet::new(
                times.iter().enumerate().map(|(i, &p)| Job::new(i as u32, p, 0.0)).collect(),
            )
            .unwrap();
            let order = Sequence::new(jobs.ids());
            let r = simulate(1, &jobs, &order).unwrap();

            let mut total = 0.0;
            for &id in order.iter() {
                total += jobs.get(id).unwrap().process_time;
                prop_assert_eq!(r.machine_completions(id), Some(vec![total]));
            }
        }
    }
}
