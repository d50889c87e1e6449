//! Improvement loop.
//!
//! # Algorithm
//!
//! Starting from a seed sequence, for a fixed number of iterations:
//!
//! 1. Swap two random positions of the current anchor (one move).
//! 2. Simulate the candidate and take its makespan.
//! 3. Keep it as the best if it beats the best so far.
//! 4. Make it the anchor if the method's acceptance rule allows.
//! 5. Shrink the threshold geometrically.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::neighborhood::random_swap;
use super::{ImproverConfig, SearchMethod};
use crate::error::Result;
use crate::models::{CompletionRecord, JobSet, Sequence, Time};
use crate::simulation::ShopSimulator;

/// Result of one improvement run.
#[derive(Debug, Clone, Serialize)]
pub struct ImprovementOutcome {
    /// Best sequence found (the seed if nothing beat it).
    pub best_sequence: Sequence,
    /// Makespan of `best_sequence`.
    pub best_makespan: Time,
    /// Completion record of `best_sequence`.
    pub best_record: CompletionRecord,
    /// Neighborhood moves generated.
    pub move_count: usize,
    /// Moves that replaced the anchor.
    pub accepted_moves: usize,
    /// Best makespan after each iteration.
    pub best_trace: Vec<Time>,
}

/// Random-swap improver for one shop configuration.
///
/// # Example
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_shop::improvement::{Improver, SearchMethod};
/// use u_shop::models::{Job, JobId, JobSet, Sequence};
/// use u_shop::simulation::{ShopModel, ShopSimulator};
///
/// let jobs = JobSet::new(vec![
///     Job::new(1, 1.0, 0.0),
///     Job::new(2, 1.0, 0.0),
///     Job::new(3, 10.0, 0.0),
/// ]).unwrap();
/// let simulator = ShopSimulator::new(ShopModel::Parallel, 2).unwrap();
/// let seed = Sequence::new(vec![JobId(3), JobId(1), JobId(2)]);
///
/// let outcome = Improver::new(simulator, SearchMethod::LocalSearch)
///     .improve(&jobs, &seed, &mut SmallRng::seed_from_u64(1))
///     .unwrap();
/// assert!(outcome.best_makespan <= 11.0);
/// assert_eq!(outcome.move_count, 500);
/// ```
#[derive(Debug, Clone)]
pub struct Improver {
    simulator: ShopSimulator,
    method: SearchMethod,
    config: ImproverConfig,
}

impl Improver {
    /// Creates an improver with the default configuration.
    pub fn new(simulator: ShopSimulator, method: SearchMethod) -> Self {
        Self {
            simulator,
            method,
            config: ImproverConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: ImproverConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &ImproverConfig {
        &self.config
    }

    /// Improves `seed`, drawing moves from `rng`.
    ///
    /// Fails with `InvalidThreshold` for an invalid configuration and with
    /// `SequenceMismatch` if `seed` is not a permutation of `jobs`.
    pub fn improve<R: Rng + ?Sized>(
        &self,
        jobs: &JobSet,
        seed: &Sequence,
        rng: &mut R,
    ) -> Result<ImprovementOutcome> {
        self.config.validate()?;
        let acceptance = self.method.acceptance();

        let best_record = self.simulator.simulate(jobs, seed)?;
        let mut outcome = ImprovementOutcome {
            best_sequence: seed.clone(),
            best_makespan: best_record.makespan(),
            best_record,
            move_count: 0,
            accepted_moves: 0,
            best_trace: Vec::with_capacity(self.config.iterations),
        };

        if seed.len() < 2 {
            debug!(jobs = seed.len(), "sequence too short for a swap move");
            return Ok(outcome);
        }

        let mut current = seed.clone();
        let mut current_makespan = outcome.best_makespan;
        let mut threshold = self.config.initial_threshold;

        for iteration in 0..self.config.iterations {
            let Some(candidate) = random_swap(&current, rng) else {
                break;
            };
            outcome.move_count += 1;

            let record = self.simulator.simulate(jobs, &candidate)?;
            let makespan = record.makespan();

            let accepted = acceptance.accepts(makespan, current_makespan, threshold);
            if makespan < outcome.best_makespan {
                debug!(iteration, makespan, "new best sequence");
                outcome.best_sequence = candidate.clone();
                outcome.best_makespan = makespan;
                outcome.best_record = record;
            }
            if accepted {
                current = candidate;
                current_makespan = makespan;
                outcome.accepted_moves += 1;
            }

            threshold *= self.config.threshold_decay;
            outcome.best_trace.push(outcome.best_makespan);
        }

        debug!(
            method = acceptance.name(),
            moves = outcome.move_count,
            accepted = outcome.accepted_moves,
            best = outcome.best_makespan,
            "improvement finished"
        );
        Ok(outcome)
    }
}
