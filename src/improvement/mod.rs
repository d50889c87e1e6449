//! Local-search improvement of dispatching sequences.
//!
//! A trajectory method over the random-swap neighborhood. Two acceptance
//! strategies share the same simulate-evaluate-compare loop:
//!
//! - **Local Search**: the anchor moves only on strictly better candidates.
//! - **Meta-Heuristic** (threshold accepting): the anchor also moves to
//!   candidates worse by less than a threshold that decays geometrically,
//!   so the search turns into hill climbing as iterations proceed.
//!
//! The best sequence seen is tracked independently of the anchor, so the
//! best makespan never increases.
//!
//! # References
//!
//! - Dueck & Scheuer (1990), "Threshold Accepting: A General Purpose
//!   Optimization Algorithm Appearing Superior to Simulated Annealing"
//! - Pinedo (2016), "Scheduling", Ch. 14: Local Search

mod acceptance;
mod config;
mod neighborhood;
mod runner;

pub use acceptance::{Acceptance, LocalSearch, SearchMethod, ThresholdAccepting};
pub use config::ImproverConfig;
pub use neighborhood::random_swap;
pub use runner::{ImprovementOutcome, Improver};
