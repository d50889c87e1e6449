//! Dispatching rules and sequencer.
//!
//! Provides the static priority rules (SPT, LPT, EDD, ERD, WSPT,
//! Wrap-Around) and a [`Sequencer`] that turns a job set into a
//! [`Sequence`](crate::models::Sequence) under one rule.
//!
//! # Usage
//!
//! ```
//! use u_shop::dispatching::{DispatchRule, Sequencer};
//! use u_shop::models::{Job, JobSet};
//!
//! let jobs = JobSet::new(vec![Job::new(1, 4.0, 5.0), Job::new(2, 2.0, 3.0)]).unwrap();
//! let sequence = Sequencer::new(DispatchRule::Spt).sequence(&jobs).unwrap();
//! assert_eq!(sequence.to_string(), "[2, 1]");
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::{sequence, Sequencer};

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::{Result, ScheduleError};
use crate::models::Job;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (sequenced first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates job priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for jobs
/// that should be sequenced first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a job.
    ///
    /// Fails with `MissingAttribute` when the job lacks a value the rule
    /// reads.
    fn evaluate(&self, job: &Job) -> Result<RuleScore>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// The closed set of dispatching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchRule {
    /// Shortest Processing Time.
    #[serde(rename = "SPT")]
    Spt,
    /// Longest Processing Time.
    #[serde(rename = "LPT")]
    Lpt,
    /// Earliest Due Date.
    #[serde(rename = "EDD")]
    Edd,
    /// Earliest Release Date.
    #[serde(rename = "ERD")]
    Erd,
    /// Weighted Shortest Processing Time.
    #[serde(rename = "WSPT")]
    Wspt,
    /// Identifier order, dealt round-robin across machines.
    #[serde(rename = "Wrap-Around")]
    WrapAround,
}

impl DispatchRule {
    /// Every rule, in menu order.
    pub const ALL: [DispatchRule; 6] = [
        DispatchRule::Wspt,
        DispatchRule::Edd,
        DispatchRule::Erd,
        DispatchRule::Lpt,
        DispatchRule::Spt,
        DispatchRule::WrapAround,
    ];

    /// Display label, as accepted by [`DispatchRule::parse`].
    pub fn label(self) -> &'static str {
        self.resolver().name()
    }

    /// The rule implementation for this variant.
    pub fn resolver(self) -> &'static dyn DispatchingRule {
        match self {
            DispatchRule::Spt => &rules::Spt,
            DispatchRule::Lpt => &rules::Lpt,
            DispatchRule::Edd => &rules::Edd,
            DispatchRule::Erd => &rules::Erd,
            DispatchRule::Wspt => &rules::Wspt,
            DispatchRule::WrapAround => &rules::WrapAround,
        }
    }

    /// Parses a rule label. Fails with `InvalidRule`.
    pub fn parse(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.label() == label.trim())
            .ok_or_else(|| ScheduleError::InvalidRule(label.to_string()))
    }
}

impl FromStr for DispatchRule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DispatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for rule in DispatchRule::ALL {
            assert_eq!(DispatchRule::parse(rule.label()).unwrap(), rule);
        }
        assert_eq!("Wrap-Around".parse::<DispatchRule>().unwrap(), DispatchRule::WrapAround);
        assert_eq!(DispatchRule::parse(" EDD ").unwrap(), DispatchRule::Edd);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            DispatchRule::parse("FIFO").unwrap_err(),
            ScheduleError::InvalidRule("FIFO".into())
        );
        assert!(DispatchRule::parse("spt").is_err());
        assert!(DispatchRule::parse("None").is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&DispatchRule::WrapAround).unwrap();
        assert_eq!(json, "\"Wrap-Around\"");
        let rule: DispatchRule = serde_json::from_str("\"WSPT\"").unwrap();
        assert_eq!(rule, DispatchRule::Wspt);
    }
}
