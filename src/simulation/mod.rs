//! Shop simulators.
//!
//! Computes exact completion times for a sequence under one of three shop
//! models. Two algorithms cover them:
//!
//! - **Assignment** (single and identical parallel machines): each job is
//!   processed once, on a machine chosen by a [`MachinePolicy`].
//! - **Flow line** (permutation flow shop): every job visits machines
//!   `1..M` in order, and every machine processes jobs in sequence order.
//!
//! Simulation is a pure function of (model, machine count, policy, job set,
//! sequence): per-machine state is created fresh for every call.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5-6
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling", Ch. 10

mod assignment;
mod flow_line;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dispatching::DispatchRule;
use crate::error::{Result, ScheduleError};
use crate::models::{CompletionRecord, JobSet, Sequence};

/// Shop topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShopModel {
    /// One machine.
    Single,
    /// Identical parallel machines; each job runs once on any machine.
    Parallel,
    /// Permutation flow shop; each job visits every machine in order.
    #[serde(rename = "Flowshop")]
    FlowShop,
}

impl ShopModel {
    /// Display label, as accepted by [`ShopModel::parse`].
    pub fn label(self) -> &'static str {
        match self {
            ShopModel::Single => "Single",
            ShopModel::Parallel => "Parallel",
            ShopModel::FlowShop => "Flowshop",
        }
    }

    /// Parses a model label.
    pub fn parse(label: &str) -> Option<Self> {
        [ShopModel::Single, ShopModel::Parallel, ShopModel::FlowShop]
            .into_iter()
            .find(|m| m.label() == label.trim())
    }

    /// Whether `rule` is defined for this model. The flow shop has no
    /// machine choice to make, so Wrap-Around is meaningless there, and ERD
    /// was never part of its rule set.
    pub fn supports_rule(self, rule: DispatchRule) -> bool {
        match self {
            ShopModel::Single | ShopModel::Parallel => true,
            ShopModel::FlowShop => matches!(
                rule,
                DispatchRule::Spt | DispatchRule::Lpt | DispatchRule::Edd | DispatchRule::Wspt
            ),
        }
    }

    /// Fails with `InvalidRule` unless [`ShopModel::supports_rule`].
    pub fn check_rule(self, rule: DispatchRule) -> Result<()> {
        if self.supports_rule(rule) {
            Ok(())
        } else {
            Err(ScheduleError::InvalidRule(format!(
                "{rule} is not defined for the {} model",
                self.label()
            )))
        }
    }

    /// Rules whose sequences seed the improvement search.
    pub fn seed_rules(self) -> [DispatchRule; 3] {
        match self {
            ShopModel::Single | ShopModel::Parallel => {
                [DispatchRule::Spt, DispatchRule::Lpt, DispatchRule::WrapAround]
            }
            ShopModel::FlowShop => [DispatchRule::Spt, DispatchRule::Lpt, DispatchRule::Edd],
        }
    }
}

impl fmt::Display for ShopModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the assignment simulator picks a machine for the next job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachinePolicy {
    /// Job at position `k` goes to machine `k mod M`, regardless of load.
    RoundRobin,
    /// Job goes to the machine that frees up first (lowest index on ties).
    #[default]
    LoadBalancing,
}

impl MachinePolicy {
    /// The policy a sequence built by `rule` is simulated with.
    pub fn for_rule(rule: DispatchRule) -> Self {
        match rule {
            DispatchRule::WrapAround => MachinePolicy::RoundRobin,
            _ => MachinePolicy::LoadBalancing,
        }
    }
}

/// Completion-time simulator for one shop configuration.
///
/// # Example
/// ```
/// use u_shop::models::{Job, JobId, JobSet, Sequence};
/// use u_shop::simulation::{ShopModel, ShopSimulator};
///
/// let jobs = JobSet::new(vec![Job::new(1, 3.0, 10.0), Job::new(2, 5.0, 10.0)]).unwrap();
/// let sequence = Sequence::new(vec![JobId(1), JobId(2)]);
///
/// let record = ShopSimulator::new(ShopModel::FlowShop, 2)
///     .unwrap()
///     .simulate(&jobs, &sequence)
///     .unwrap();
/// assert_eq!(record.machine_completions(JobId(2)), Some(vec![8.0, 13.0]));
/// assert_eq!(record.makespan(), 13.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopSimulator {
    model: ShopModel,
    machine_count: usize,
    policy: MachinePolicy,
}

impl ShopSimulator {
    /// Creates a simulator with the load-balancing policy.
    ///
    /// Fails with `InvalidMachineCount` when `machine_count` is zero, or is
    /// not 1 for the single-machine model.
    pub fn new(model: ShopModel, machine_count: usize) -> Result<Self> {
        let valid = match model {
            ShopModel::Single => machine_count == 1,
            ShopModel::Parallel | ShopModel::FlowShop => machine_count > 0,
        };
        if !valid {
            return Err(ScheduleError::InvalidMachineCount(machine_count as i64));
        }
        Ok(Self {
            model,
            machine_count,
            policy: MachinePolicy::default(),
        })
    }

    /// Sets the machine-selection policy. The flow line ignores it.
    pub fn with_policy(mut self, policy: MachinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the policy a sequence built by `rule` is simulated with.
    pub fn for_rule(self, rule: DispatchRule) -> Self {
        self.with_policy(MachinePolicy::for_rule(rule))
    }

    /// Shop model.
    pub fn model(&self) -> ShopModel {
        self.model
    }

    /// Number of machines.
    pub fn machine_count(&self) -> usize {
        self.machine_count
    }

    /// Machine-selection policy.
    pub fn policy(&self) -> MachinePolicy {
        self.policy
    }

    /// Simulates `sequence`.
    ///
    /// Fails with `SequenceMismatch` unless `sequence` is an exact
    /// permutation of the job set.
    pub fn simulate(&self, jobs: &JobSet, sequence: &Sequence) -> Result<CompletionRecord> {
        sequence.validate_against(jobs)?;
        match self.model {
            ShopModel::Single | ShopModel::Parallel => {
                assignment::simulate(self.machine_count, self.policy, jobs, sequence)
            }
            ShopModel::FlowShop => flow_line::simulate(self.machine_count, jobs, sequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, JobId};

    fn jobs() -> JobSet {
        JobSet::new(vec![
            Job::new(1, 4.0, 5.0),
            Job::new(2, 2.0, 3.0).with_weight(2.0),
            Job::new(3, 6.0, 10.0),
        ])
        .unwrap()
    }

    fn seq(raw: &[u32]) -> Sequence {
        raw.iter().copied().map(JobId).collect()
    }

    #[test]
    fn test_machine_count_validation() {
        assert_eq!(
            ShopSimulator::new(ShopModel::Parallel, 0).unwrap_err(),
            ScheduleError::InvalidMachineCount(0)
        );
        assert!(ShopSimulator::new(ShopModel::FlowShop, 0).is_err());
        assert!(ShopSimulator::new(ShopModel::Single, 2).is_err());
        assert!(ShopSimulator::new(ShopModel::Single, 1).is_ok());
    }

    #[test]
    fn test_sequence_mismatch() {
        let sim = ShopSimulator::new(ShopModel::Parallel, 2).unwrap();
        for bad in [&[1, 2][..], &[1, 2, 2], &[1, 2, 3, 4]] {
            assert!(matches!(
                sim.simulate(&jobs(), &seq(bad)),
                Err(ScheduleError::SequenceMismatch(_))
            ));
        }
    }

    #[test]
    fn test_simulation_is_idempotent() {
        let set = jobs();
        let s = seq(&[3, 1, 2]);
        for model in [ShopModel::Parallel, ShopModel::FlowShop] {
            let sim = ShopSimulator::new(model, 2).unwrap();
            assert_eq!(sim.simulate(&set, &s).unwrap(), sim.simulate(&set, &s).unwrap());
        }
    }

    #[test]
    fn test_rule_support() {
        assert!(ShopModel::Parallel.supports_rule(DispatchRule::WrapAround));
        assert!(ShopModel::FlowShop.supports_rule(DispatchRule::Wspt));
        assert!(ShopModel::FlowShop.check_rule(DispatchRule::WrapAround).is_err());
        assert!(ShopModel::FlowShop.check_rule(DispatchRule::Erd).is_err());
    }

    #[test]
    fn test_seed_rules() {
        assert_eq!(
            ShopModel::Single.seed_rules(),
            [DispatchRule::Spt, DispatchRule::Lpt, DispatchRule::WrapAround]
        );
        assert_eq!(
            ShopModel::FlowShop.seed_rules(),
            [DispatchRule::Spt, DispatchRule::Lpt, DispatchRule::Edd]
        );
    }

    #[test]
    fn test_policy_for_rule() {
        assert_eq!(MachinePolicy::for_rule(DispatchRule::WrapAround), MachinePolicy::RoundRobin);
        assert_eq!(MachinePolicy::for_rule(DispatchRule::Spt), MachinePolicy::LoadBalancing);

        let sim = ShopSimulator::new(ShopModel::Parallel, 3).unwrap();
        assert_eq!(sim.policy(), MachinePolicy::LoadBalancing);
        let wrapped = sim.for_rule(DispatchRule::WrapAround);
        assert_eq!(wrapped.policy(), MachinePolicy::RoundRobin);
        assert_eq!(wrapped.machine_count(), 3);
    }

    #[test]
    fn test_model_labels() {
        assert_eq!(ShopModel::parse("Flowshop"), Some(ShopModel::FlowShop));
        assert_eq!(ShopModel::parse(" Parallel"), Some(ShopModel::Parallel));
        assert_eq!(ShopModel::parse("Jobshop"), None);
        assert_eq!(serde_json::to_string(&ShopModel::FlowShop).unwrap(), "\"Flowshop\"");
    }
}
