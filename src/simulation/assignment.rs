//! Machine-assignment simulator (single and identical parallel machines).
//!
//! # Algorithm
//!
//! 1. Reset every machine's busy-until time to 0.
//! 2. For each job in sequence order, pick a machine by policy: round-robin
//!    by position, or the machine with the smallest busy-until time.
//! 3. The job starts when that machine frees up and ends one process time
//!    later; the machine is busy until then.
//!
//! # Complexity
//! O(n * m) where n=jobs, m=machines (O(n) for round-robin).
//!
//! # Reference
//! Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (list scheduling)

use super::MachinePolicy;
use crate::error::Result;
use crate::models::{CompletionRecord, JobCompletion, JobSet, Operation, Sequence, Time};

/// Per-machine cumulative busy-until times for one simulation run.
#[derive(Debug, Clone)]
struct MachineState {
    busy_until: Vec<Time>,
}

impl MachineState {
    fn new(machine_count: usize) -> Self {
        Self {
            busy_until: vec![0.0; machine_count],
        }
    }

    /// Machine that frees up first; lowest index on ties.
    fn least_loaded(&self) -> usize {
        let mut best = 0;
        for (m, &t) in self.busy_until.iter().enumerate().skip(1) {
            if t < self.busy_until[best] {
                best = m;
            }
        }
        best
    }

    /// Books `duration` on `machine`, returning the operation.
    fn book(&mut self, machine: usize, duration: Time) -> Operation {
        let start = self.busy_until[machine];
        let end = start + duration;
        self.busy_until[machine] = end;
        Operation::new(machine, start, end)
    }
}

/// Simulates a permutation already validated against `jobs`.
pub(super) fn simulate(
    machine_count: usize,
    policy: MachinePolicy,
    jobs: &JobSet,
    sequence: &Sequence,
) -> Result<CompletionRecord> {
    let mut state = MachineState::new(machine_count);
    let mut entries = Vec::with_capacity(sequence.len());

    for (position, &job_id) in sequence.iter().enumerate() {
        let job = jobs.require(job_id)?;
        let machine = match policy {
            MachinePolicy::RoundRobin => position % machine_count,
            MachinePolicy::LoadBalancing => state.least_loaded(),
        };
        let operation = state.book(machine, job.process_time);
        entries.push(JobCompletion {
            job_id,
            operations: vec![operation],
        });
    }

    Ok(CompletionRecord::from_entries(entries))
}
