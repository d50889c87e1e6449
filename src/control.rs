//! Control-surface boundary.
//!
//! A [`RunRequest`] carries what a user picked (shop model, machine count,
//! rule, method, threshold). [`RunRequest::validate`] rejects invalid
//! combinations before any engine work and yields a [`RunPlan`], which
//! runs either a single dispatching rule or the multi-start search and
//! produces a [`ScheduleReport`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::dispatching::{DispatchRule, Sequencer};
use crate::error::{Result, ScheduleError};
use crate::improvement::SearchMethod;
use crate::models::{GanttBar, JobSet, Sequence};
use crate::objectives::ObjectiveResult;
use crate::search::{Method, SearchConfig, SeedSequence, SolutionSearch};
use crate::simulation::{ShopModel, ShopSimulator};

/// Report label of the move counter row.
pub const MOVE_COUNT_LABEL: &str = "Number of neighborhood structures";

/// Which configuration fields a shop model and method need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredFields {
    /// Machine count input (fixed at 1 for the single machine).
    pub machine_count: bool,
    /// Method selector.
    pub method: bool,
    /// Dispatching rule selector.
    pub rule: bool,
    /// Threshold input.
    pub threshold: bool,
}

/// Fields to show for `model` and `method`.
///
/// The single machine offers only the rule selector; the method, and with
/// it the threshold, is not selectable there.
///
/// ```
/// use u_shop::control::required_fields;
/// use u_shop::search::Method;
/// use u_shop::simulation::ShopModel;
///
/// let fields = required_fields(ShopModel::Parallel, Method::MetaHeuristic);
/// assert!(fields.machine_count && fields.threshold && !fields.rule);
/// ```
pub fn required_fields(model: ShopModel, method: Method) -> RequiredFields {
    let method_visible = model != ShopModel::Single;
    RequiredFields {
        machine_count: method_visible,
        method: method_visible,
        rule: !method_visible || method == Method::None,
        threshold: method_visible && method == Method::MetaHeuristic,
    }
}

/// User selections for one run, as received from a control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Shop topology.
    pub shop_model: ShopModel,
    /// Machine count. Ignored for the single machine.
    #[serde(default)]
    pub machine_count: Option<i64>,
    /// Dispatching rule, required when no improvement method runs.
    #[serde(default)]
    pub rule: Option<DispatchRule>,
    /// Run method.
    #[serde(default = "default_method")]
    pub method: Method,
    /// Initial threshold for the metaheuristic.
    #[serde(default)]
    pub threshold: Option<i64>,
}

fn default_method() -> Method {
    Method::None
}

impl RunRequest {
    /// A request that dispatches with `rule` and runs no improvement.
    pub fn dispatch(shop_model: ShopModel, rule: DispatchRule) -> Self {
        Self {
            shop_model,
            machine_count: None,
            rule: Some(rule),
            method: Method::None,
            threshold: None,
        }
    }

    /// A request that runs the multi-start search.
    pub fn search(shop_model: ShopModel, method: SearchMethod) -> Self {
        Self {
            shop_model,
            machine_count: None,
            rule: None,
            method: method.into(),
            threshold: None,
        }
    }

    /// Sets the machine count.
    pub fn with_machine_count(mut self, count: i64) -> Self {
        self.machine_count = Some(count);
        self
    }

    /// Sets the metaheuristic threshold.
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Checks the selections and builds a plan.
    ///
    /// - `InvalidMachineCount`: absent or non-positive count on a
    ///   multi-machine model.
    /// - `InvalidRule`: no rule when one is required, or a rule the shop
    ///   model does not support.
    /// - `InvalidThreshold`: absent or negative threshold for the
    ///   metaheuristic.
    pub fn validate(&self) -> Result<RunPlan> {
        let machine_count = match self.shop_model {
            ShopModel::Single => 1,
            ShopModel::Parallel | ShopModel::FlowShop => {
                let count = self
                    .machine_count
                    .ok_or(ScheduleError::InvalidMachineCount(0))?;
                usize::try_from(count)
                    .ok()
                    .filter(|&c| c > 0)
                    .ok_or(ScheduleError::InvalidMachineCount(count))?
            }
        };
        let simulator = ShopSimulator::new(self.shop_model, machine_count)?;

        let mode = match self.method {
            Method::None => {
                let rule = self.rule.ok_or_else(|| {
                    ScheduleError::InvalidRule("no dispatching rule selected".into())
                })?;
                self.shop_model.check_rule(rule)?;
                RunMode::Dispatch(rule)
            }
            Method::LocalSearch => RunMode::Search {
                method: SearchMethod::LocalSearch,
                threshold: 0.0,
            },
            Method::MetaHeuristic => {
                let threshold = self.threshold.ok_or_else(|| {
                    ScheduleError::InvalidThreshold("no threshold given".into())
                })?;
                if threshold < 0 {
                    return Err(ScheduleError::InvalidThreshold(format!(
                        "threshold can not be negative, got {threshold}"
                    )));
                }
                RunMode::Search {
                    method: SearchMethod::MetaHeuristic,
                    threshold: threshold as f64,
                }
            }
        };

        Ok(RunPlan { simulator, mode })
    }
}

/// What a validated plan runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunMode {
    /// One dispatching rule, no improvement.
    Dispatch(DispatchRule),
    /// Multi-start improvement.
    Search {
        /// Acceptance method.
        method: SearchMethod,
        /// Initial threshold.
        threshold: f64,
    },
}

/// A validated run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunPlan {
    simulator: ShopSimulator,
    mode: RunMode,
}

impl RunPlan {
    /// Simulator the plan runs with (load-balancing policy).
    pub fn simulator(&self) -> ShopSimulator {
        self.simulator
    }

    /// What the plan runs.
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Runs the plan over `jobs`.
    ///
    /// For a search, the threshold of the plan overrides
    /// `config.improver.initial_threshold`.
    pub fn execute(&self, jobs: &JobSet, config: &SearchConfig) -> Result<ScheduleReport> {
        let machine_count = self.simulator.machine_count();
        match self.mode {
            RunMode::Dispatch(rule) => {
                let sequence = Sequencer::new(rule).sequence(jobs)?;
                let record = self.simulator.for_rule(rule).simulate(jobs, &sequence)?;
                let objectives = ObjectiveResult::calculate(jobs, &sequence, &record)?;
                info!(rule = rule.label(), makespan = objectives.makespan, "dispatch run finished");
                Ok(ScheduleReport {
                    objectives,
                    sequence_label: format!("{} Sequence", rule.label()),
                    sequence,
                    seed_sequences: Vec::new(),
                    move_count: None,
                    gantt: record.gantt_bars(),
                    utilization: record.machine_utilization(machine_count),
                })
            }
            RunMode::Search { method, threshold } => {
                let improver = config.improver.clone().with_initial_threshold(threshold);
                let outcome = SolutionSearch::new(self.simulator, method)
                    .with_config(improver)
                    .run(jobs, &mut config.rng())?;
                let objectives =
                    ObjectiveResult::calculate(jobs, &outcome.best_sequence, &outcome.best_record)?;
                Ok(ScheduleReport {
                    objectives,
                    sequence_label: format!("{} Sequence", method.label()),
                    sequence: outcome.best_sequence,
                    seed_sequences: outcome.seed_sequences,
                    move_count: Some(outcome.move_count),
                    gantt: outcome.best_record.gantt_bars(),
                    utilization: outcome.best_record.machine_utilization(machine_count),
                })
            }
        }
    }
}

/// Validates `request` and runs it over `jobs`.
pub fn run(request: &RunRequest, jobs: &JobSet, config: &SearchConfig) -> Result<ScheduleReport> {
    request.validate()?.execute(jobs, config)
}

/// Value cell of a report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    /// Objective value.
    Number(f64),
    /// Job sequence.
    Sequence(Sequence),
    /// Counter.
    Count(usize),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Number(v) => write!(f, "{v}"),
            ReportValue::Sequence(s) => write!(f, "{s}"),
            ReportValue::Count(n) => write!(f, "{n}"),
        }
    }
}

/// Everything a reporting or charting collaborator needs from one run.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    /// The seven objectives of the reported sequence.
    pub objectives: ObjectiveResult,
    /// `<RULE> Sequence`, `Local Search Sequence` or `Meta-Heuristic Sequence`.
    pub sequence_label: String,
    /// Reported sequence.
    pub sequence: Sequence,
    /// Seed sequences (search runs only).
    pub seed_sequences: Vec<SeedSequence>,
    /// Neighborhood moves (search runs only).
    pub move_count: Option<usize>,
    /// One bar per job per machine, sorted by machine then start.
    pub gantt: Vec<GanttBar>,
    /// Busy fraction of each machine.
    pub utilization: Vec<f64>,
}

impl ScheduleReport {
    /// Two-column table rows: objectives, then the sequence, then the
    /// seeds, then the move counter.
    pub fn rows(&self) -> Vec<(String, ReportValue)> {
        let mut rows: Vec<(String, ReportValue)> = self
            .objectives
            .rows()
            .into_iter()
            .map(|(label, value)| (label.to_string(), ReportValue::Number(value)))
            .collect();
        rows.push((
            self.sequence_label.clone(),
            ReportValue::Sequence(self.sequence.clone()),
        ));
        rows.extend(
            self.seed_sequences
                .iter()
                .map(|s| (s.label.clone(), ReportValue::Sequence(s.sequence.clone()))),
        );
        if let Some(moves) = self.move_count {
            rows.push((MOVE_COUNT_LABEL.to_string(), ReportValue::Count(moves)));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::improvement::ImproverConfig;
    use crate::models::{Job, JobId};
    use rstest::rstest;

    fn jobs() -> JobSet {
        JobSet::new(vec![
            Job::new(1, 4.0, 5.0),
            Job::new(2, 2.0, 3.0).with_weight(2.0),
            Job::new(3, 6.0, 10.0),
        ])
        .unwrap()
    }

    fn quick() -> SearchConfig {
        SearchConfig::default()
            .with_improver(ImproverConfig::default().with_iterations(40))
            .with_seed(17)
    }

    fn fields(machine_count: bool, method: bool, rule: bool, threshold: bool) -> RequiredFields {
        RequiredFields {
            machine_count,
            method,
            rule,
            threshold,
        }
    }

    #[rstest]
    #[case(ShopModel::Single, Method::None, fields(false, false, true, false))]
    #[case(ShopModel::Single, Method::MetaHeuristic, fields(false, false, true, false))]
    #[case(ShopModel::Parallel, Method::None, fields(true, true, true, false))]
    #[case(ShopModel::Parallel, Method::LocalSearch, fields(true, true, false, false))]
    #[case(ShopModel::FlowShop, Method::MetaHeuristic, fields(true, true, false, true))]
    fn test_required_fields(
        #[case] model: ShopModel,
        #[case] method: Method,
        #[case] expected: RequiredFields,
    ) {
        assert_eq!(required_fields(model, method), expected);
    }

    #[test]
    fn test_single_forces_one_machine() {
        let plan = RunRequest::dispatch(ShopModel::Single, DispatchRule::Spt)
            .with_machine_count(5)
            .validate()
            .unwrap();
        assert_eq!(plan.simulator().machine_count(), 1);
    }

    #[rstest]
    #[case(None, ScheduleError::InvalidMachineCount(0))]
    #[case(Some(0), ScheduleError::InvalidMachineCount(0))]
    #[case(Some(-3), ScheduleError::InvalidMachineCount(-3))]
    fn test_machine_count_rejected(#[case] count: Option<i64>, #[case] expected: ScheduleError) {
        let mut request = RunRequest::dispatch(ShopModel::Parallel, DispatchRule::Spt);
        request.machine_count = count;
        assert_eq!(request.validate().unwrap_err(), expected);
    }

    #[test]
    fn test_threshold_rules() {
        let base = RunRequest::search(ShopModel::Parallel, SearchMethod::MetaHeuristic)
            .with_machine_count(2);
        assert!(matches!(
            base.validate(),
            Err(ScheduleError::InvalidThreshold(_))
        ));
        assert!(matches!(
            base.clone().with_threshold(-1).validate(),
            Err(ScheduleError::InvalidThreshold(_))
        ));
        let plan = base.with_threshold(4).validate().unwrap();
        assert_eq!(
            plan.mode(),
            RunMode::Search { method: SearchMethod::MetaHeuristic, threshold: 4.0 }
        );

        // local search ignores the threshold entirely
        let local = RunRequest::search(ShopModel::Parallel, SearchMethod::LocalSearch)
            .with_machine_count(2)
            .with_threshold(-1);
        assert!(local.validate().is_ok());
    }

    #[test]
    fn test_rule_rules() {
        let mut request = RunRequest::dispatch(ShopModel::Parallel, DispatchRule::Spt)
            .with_machine_count(2);
        request.rule = None;
        assert!(matches!(request.validate(), Err(ScheduleError::InvalidRule(_))));

        for rule in [DispatchRule::Erd, DispatchRule::WrapAround] {
            let flow = RunRequest::dispatch(ShopModel::FlowShop, rule).with_machine_count(2);
            assert!(matches!(flow.validate(), Err(ScheduleError::InvalidRule(_))));
        }
        let flow =
            RunRequest::dispatch(ShopModel::FlowShop, DispatchRule::Wspt).with_machine_count(2);
        assert!(flow.validate().is_ok());
    }

    #[test]
    fn test_dispatch_run_report() {
        let report = run(
            &RunRequest::dispatch(ShopModel::Single, DispatchRule::Spt),
            &jobs(),
            &SearchConfig::default(),
        )
        .unwrap();

        assert_eq!(report.sequence_label, "SPT Sequence");
        assert_eq!(report.sequence, Sequence::new(vec![JobId(2), JobId(1), JobId(3)]));
        assert_eq!(report.objectives.makespan, 12.0);
        assert_eq!(report.move_count, None);
        assert_eq!(report.utilization, vec![1.0]);
        assert_eq!(report.gantt.len(), 3);

        let rows = report.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ("Makespan".to_string(), ReportValue::Number(12.0)));
        assert_eq!(rows[7].1.to_string(), "[2, 1, 3]");
    }

    #[test]
    fn test_wrap_around_dispatch_uses_round_robin() {
        let request = RunRequest::dispatch(ShopModel::Parallel, DispatchRule::WrapAround)
            .with_machine_count(2);
        let report = run(&request, &jobs(), &SearchConfig::default()).unwrap();
        assert_eq!(report.objectives.makespan, 10.0);
        let machines: Vec<usize> = report.gantt.iter().map(|b| b.machine).collect();
        assert_eq!(machines, vec![0, 0, 1]);
    }

    #[test]
    fn test_search_run_report() {
        let request = RunRequest::search(ShopModel::FlowShop, SearchMethod::MetaHeuristic)
            .with_machine_count(2)
            .with_threshold(3);
        let report = run(&request, &jobs(), &quick()).unwrap();

        assert_eq!(report.sequence_label, "Meta-Heuristic Sequence");
        assert_eq!(report.seed_sequences.len(), 3);
        assert_eq!(report.move_count, Some(120));
        assert_eq!(report.gantt.len(), 6);

        let rows = report.rows();
        assert_eq!(rows.len(), 7 + 1 + 3 + 1);
        assert_eq!(rows[8].0, "Initial_sequence_SPT");
        assert_eq!(rows[11], (MOVE_COUNT_LABEL.to_string(), ReportValue::Count(120)));
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{"shop_model": "Parallel", "machine_count": 2, "method": "Local Search"}"#;
        let request: RunRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, Method::LocalSearch);
        assert!(request.validate().is_ok());

        let json = r#"{"shop_model": "Single", "rule": "EDD"}"#;
        let request: RunRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.method, Method::None);
        assert_eq!(request.rule, Some(DispatchRule::Edd));
    }
}
