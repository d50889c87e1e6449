//! Completion record (simulation result) model.
//!
//! A completion record holds, per job, the operations it was processed in:
//! one operation for the single and parallel models, one per machine for the
//! flow-line model. Records are values; every simulation builds a fresh one.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::Serialize;
use std::collections::HashMap;

use super::{JobId, Time};

/// One job processed on one machine during `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Operation {
    /// 0-based machine index.
    pub machine: usize,
    /// Start time.
    pub start: Time,
    /// End (completion) time on this machine.
    pub end: Time,
}

impl Operation {
    /// Creates an operation.
    pub fn new(machine: usize, start: Time, end: Time) -> Self {
        Self {
            machine,
            start,
            end,
        }
    }

    /// Processing duration.
    #[inline]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }
}

/// Operations of one job, ordered by machine visit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCompletion {
    /// Job identifier.
    pub job_id: JobId,
    /// Operations in visit order. The last one ends at the job's completion time.
    pub operations: Vec<Operation>,
}

impl JobCompletion {
    /// The job's true completion time (end of its last operation).
    pub fn completion_time(&self) -> Time {
        self.operations.last().map(|op| op.end).unwrap_or(0.0)
    }

    /// Completion times per visited machine, in visit order.
    pub fn machine_completions(&self) -> Vec<Time> {
        self.operations.iter().map(|op| op.end).collect()
    }
}

/// A bar of a Gantt chart: one job on one machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GanttBar {
    /// Job identifier.
    pub job_id: JobId,
    /// 0-based machine index.
    pub machine: usize,
    /// Start time.
    pub start: Time,
    /// End time.
    pub end: Time,
}

/// Completion times of every job in a simulated sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionRecord {
    /// Per-job completions, in sequence order.
    entries: Vec<JobCompletion>,
    #[serde(skip)]
    index: HashMap<JobId, usize>,
}

impl CompletionRecord {
    pub(crate) fn from_entries(entries: Vec<JobCompletion>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.job_id, i))
            .collect();
        Self { entries, index }
    }

    /// Per-job completions in sequence order.
    pub fn entries(&self) -> &[JobCompletion] {
        &self.entries
    }

    /// Completion details of one job.
    pub fn get(&self, job_id: JobId) -> Option<&JobCompletion> {
        self.index.get(&job_id).map(|&i| &self.entries[i])
    }

    /// True completion time of one job.
    pub fn completion_time(&self, job_id: JobId) -> Option<Time> {
        self.get(job_id).map(JobCompletion::completion_time)
    }

    /// Per-machine completion vector of one job.
    pub fn machine_completions(&self, job_id: JobId) -> Option<Vec<Time>> {
        self.get(job_id).map(JobCompletion::machine_completions)
    }

    /// True completion time per job.
    pub fn completion_times(&self) -> HashMap<JobId, Time> {
        self.entries
            .iter()
            .map(|e| (e.job_id, e.completion_time()))
            .collect()
    }

    /// Makespan: latest completion time (0 when empty).
    pub fn makespan(&self) -> Time {
        self.entries
            .iter()
            .map(JobCompletion::completion_time)
            .fold(0.0, Time::max)
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no job was simulated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every operation as a Gantt bar, sorted by machine then start time.
    pub fn gantt_bars(&self) -> Vec<GanttBar> {
        let mut bars: Vec<GanttBar> = self
            .entries
            .iter()
            .flat_map(|e| {
                e.operations.iter().map(move |op| GanttBar {
                    job_id: e.job_id,
                    machine: op.machine,
                    start: op.start,
                    end: op.end,
                })
            })
            .collect();
        bars.sort_by(|a, b| {
            a.machine
                .cmp(&b.machine)
                .then(a.start.total_cmp(&b.start))
        });
        bars
    }

    /// Busy time divided by makespan, for machines `0..machine_count`.
    ///
    /// All zeros when the makespan is zero.
    pub fn machine_utilization(&self, machine_count: usize) -> Vec<f64> {
        let mut busy = vec![0.0; machine_count];
        for op in self.entries.iter().flat_map(|e| e.operations.iter()) {
            if let Some(slot) = busy.get_mut(op.machine) {
                *slot += op.duration();
            }
        }
        let horizon = self.makespan();
        if horizon <= 0.0 {
            return vec![0.0; machine_count];
        }
        busy.into_iter().map(|b| b / horizon).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> CompletionRecord {
        CompletionRecord::from_entries(vec![
            JobCompletion {
                job_id: JobId(1),
                operations: vec![Operation::new(0, 0.0, 3.0), Operation::new(1, 3.0, 6.0)],
            },
            JobCompletion {
                job_id: JobId(2),
                operations: vec![Operation::new(0, 3.0, 8.0), Operation::new(1, 8.0, 13.0)],
            },
        ])
    }

    #[test]
    fn test_makespan_and_lookup() {
        let r = sample_record();
        assert_eq!(r.makespan(), 13.0);
        assert_eq!(r.completion_time(JobId(1)), Some(6.0));
        assert_eq!(r.machine_completions(JobId(2)), Some(vec![8.0, 13.0]));
        assert_eq!(r.completion_time(JobId(9)), None);
        assert_eq!(r.completion_times()[&JobId(2)], 13.0);
    }

    #[test]
    fn test_gantt_bars_sorted_by_machine() {
        let bars = sample_record().gantt_bars();
        assert_eq!(bars.len(), 4);
        let order: Vec<(usize, u32)> = bars.iter().map(|b| (b.machine, b.job_id.0)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_machine_utilization() {
        let util = sample_record().machine_utilization(2);
        // machine 0 busy 3 + 5 = 8 of 13, machine 1 busy 3 + 5 = 8 of 13
        assert!((util[0] - 8.0 / 13.0).abs() < 1e-12);
        assert!((util[1] - 8.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_record() {
        let r = CompletionRecord::default();
        assert!(r.is_empty());
        assert_eq!(r.makespan(), 0.0);
        assert_eq!(r.machine_utilization(2), vec![0.0, 0.0]);
    }
}
