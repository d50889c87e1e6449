//! Anchor acceptance strategies.
//!
//! Both improvement methods share one loop; they differ only in when a
//! candidate replaces the current anchor the next move starts from.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

use crate::error::{Result, ScheduleError};
use crate::models::Time;

/// Decides whether a candidate becomes the new search anchor.
pub trait Acceptance: Send + Sync + Debug {
    /// Strategy name.
    fn name(&self) -> &'static str;

    /// Whether a candidate with makespan `candidate` replaces an anchor with
    /// makespan `current`, given the current threshold band.
    fn accepts(&self, candidate: Time, current: Time, threshold: f64) -> bool;
}

/// Hill climbing: only strictly improving moves move the anchor.
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch;

impl Acceptance for LocalSearch {
    fn name(&self) -> &'static str {
        "Local Search"
    }

    fn accepts(&self, candidate: Time, current: Time, _threshold: f64) -> bool {
        candidate < current
    }
}

/// Threshold accepting: moves worse than the anchor by less than the
/// threshold are accepted too.
///
/// # Reference
/// Dueck & Scheuer (1990), "Threshold Accepting: A General Purpose
/// Optimization Algorithm"
#[derive(Debug, Clone, Copy)]
pub struct ThresholdAccepting;

impl Acceptance for ThresholdAccepting {
    fn name(&self) -> &'static str {
        "Meta-Heuristic"
    }

    fn accepts(&self, candidate: Time, current: Time, threshold: f64) -> bool {
        candidate < current + threshold
    }
}

/// Improvement method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchMethod {
    /// Random-swap hill climbing.
    #[serde(rename = "Local Search")]
    LocalSearch,
    /// Random-swap threshold accepting.
    #[serde(rename = "Meta-Heuristic")]
    MetaHeuristic,
}

impl SearchMethod {
    /// The acceptance strategy for this method.
    pub fn acceptance(self) -> &'static dyn Acceptance {
        match self {
            SearchMethod::LocalSearch => &LocalSearch,
            SearchMethod::MetaHeuristic => &ThresholdAccepting,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        self.acceptance().name()
    }

    /// Parses a method label. Fails with `UnknownMethod`.
    pub fn parse(label: &str) -> Result<Self> {
        [SearchMethod::LocalSearch, SearchMethod::MetaHeuristic]
            .into_iter()
            .find(|m| m.label() == label.trim())
            .ok_or_else(|| ScheduleError::UnknownMethod(label.to_string()))
    }
}

impl FromStr for SearchMethod {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
