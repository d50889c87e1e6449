//! Multi-start solution search.
//!
//! Builds one seed sequence per seed rule of the shop model, improves each
//! one, and keeps the best. Each seed is simulated with the machine policy
//! its rule implies, both when seeding and during improvement.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::dispatching::Sequencer;
use crate::error::{Result, ScheduleError};
use crate::improvement::{Improver, ImproverConfig, SearchMethod};
use crate::models::{CompletionRecord, JobSet, Sequence, Time};
use crate::simulation::{ShopModel, ShopSimulator};

/// Run method as selected on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// Dispatch with one rule, no improvement.
    None,
    /// Multi-start hill climbing.
    #[serde(rename = "Local Search")]
    LocalSearch,
    /// Multi-start threshold accepting.
    #[serde(rename = "Meta-Heuristic")]
    MetaHeuristic,
}

impl Method {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Method::None => "None",
            Method::LocalSearch => SearchMethod::LocalSearch.label(),
            Method::MetaHeuristic => SearchMethod::MetaHeuristic.label(),
        }
    }

    /// Parses a method label. Fails with `UnknownMethod`.
    pub fn parse(label: &str) -> Result<Self> {
        [Method::None, Method::LocalSearch, Method::MetaHeuristic]
            .into_iter()
            .find(|m| m.label() == label.trim())
            .ok_or_else(|| ScheduleError::UnknownMethod(label.to_string()))
    }

    /// The improvement method, if any.
    pub fn search_method(self) -> Option<SearchMethod> {
        SearchMethod::try_from(self).ok()
    }
}

impl FromStr for Method {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<SearchMethod> for Method {
    fn from(method: SearchMethod) -> Self {
        match method {
            SearchMethod::LocalSearch => Method::LocalSearch,
            SearchMethod::MetaHeuristic => Method::MetaHeuristic,
        }
    }
}

impl TryFrom<Method> for SearchMethod {
    type Error = ScheduleError;

    fn try_from(method: Method) -> Result<Self> {
        match method {
            Method::LocalSearch => Ok(SearchMethod::LocalSearch),
            Method::MetaHeuristic => Ok(SearchMethod::MetaHeuristic),
            Method::None => Err(ScheduleError::UnknownMethod(format!(
                "'{}' is not an improvement method",
                method.label()
            ))),
        }
    }
}

/// Search configuration.
///
/// # Example
/// ```
/// use u_shop::search::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.improver.iterations, 500);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Improvement loop parameters, shared by every seed.
    pub improver: ImproverConfig,
    /// RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Sets the improvement loop parameters.
    pub fn with_improver(mut self, improver: ImproverConfig) -> Self {
        self.improver = improver;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Random source for one run.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

/// One seed sequence and its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedSequence {
    /// `Initial_sequence_<RULE>`.
    pub label: String,
    /// Sequence produced by the seed rule.
    pub sequence: Sequence,
}

/// Result of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Winning sequence over all seeds.
    pub best_sequence: Sequence,
    /// Its completion record.
    pub best_record: CompletionRecord,
    /// Its makespan.
    pub best_makespan: Time,
    /// Seed sequences in seed-rule order.
    pub seed_sequences: Vec<SeedSequence>,
    /// Neighborhood moves over all seeds.
    pub move_count: usize,
}

/// Multi-start search over the seed rules of a shop model.
#[derive(Debug, Clone)]
pub struct SolutionSearch {
    simulator: ShopSimulator,
    method: SearchMethod,
    config: ImproverConfig,
}

impl SolutionSearch {
    /// Creates a search with the default improver configuration.
    pub fn new(simulator: ShopSimulator, method: SearchMethod) -> Self {
        Self {
            simulator,
            method,
            config: ImproverConfig::default(),
        }
    }

    /// Sets the improver configuration.
    pub fn with_config(mut self, config: ImproverConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the search.
    ///
    /// The seed with the strictly smallest best makespan wins; ties go to
    /// the earlier seed rule.
    pub fn run<R: Rng + ?Sized>(&self, jobs: &JobSet, rng: &mut R) -> Result<SearchOutcome> {
        self.config.validate()?;
        let model = self.simulator.model();
        info!(
            model = model.label(),
            machines = self.simulator.machine_count(),
            method = self.method.label(),
            jobs = jobs.len(),
            "solution search started"
        );

        let mut seed_sequences = Vec::with_capacity(3);
        let mut move_count = 0;
        let mut best: Option<(Sequence, CompletionRecord, Time)> = None;

        for rule in model.seed_rules() {
            let seed = Sequencer::new(rule).sequence(jobs)?;
            debug!(rule = rule.label(), sequence = %seed, "seed sequence built");

            let improver = Improver::new(self.simulator.for_rule(rule), self.method)
                .with_config(self.config.clone());
            let outcome = improver.improve(jobs, &seed, rng)?;
            move_count += outcome.move_count;
            info!(
                rule = rule.label(),
                makespan = outcome.best_makespan,
                moves = outcome.move_count,
                "seed improved"
            );

            let better = best
                .as_ref()
                .map_or(true, |(_, _, makespan)| outcome.best_makespan < *makespan);
            if better {
                best = Some((outcome.best_sequence, outcome.best_record, outcome.best_makespan));
            }
            seed_sequences.push(SeedSequence {
                label: format!("Initial_sequence_{}", rule.label()),
                sequence: seed,
            });
        }

        let (best_sequence, best_record, best_makespan) = best.ok_or_else(|| {
            ScheduleError::InvalidRule(format!("no seed rules for the {model} model"))
        })?;
        info!(makespan = best_makespan, moves = move_count, "solution search finished");

        Ok(SearchOutcome {
            best_sequence,
            best_record,
            best_makespan,
            seed_sequences,
            move_count,
        })
    }
}
