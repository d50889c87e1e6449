//! Job-shop sequencing and scheduling engine.
//!
//! Orders a set of independent jobs for three shop topologies, simulates
//! exact completion times, scores the result on seven objectives, and
//! improves sequences by random-swap local search or threshold accepting.
//!
//! # Modules
//!
//! - **`models`**: `Job`, `JobSet`, `Sequence`, `CompletionRecord`, `JobTable`
//! - **`validation`**: job-set integrity and permutation checks
//! - **`dispatching`**: static priority rules (SPT, LPT, EDD, ERD, WSPT,
//!   Wrap-Around) and the `Sequencer`
//! - **`simulation`**: single, parallel and flow-shop completion-time
//!   simulators
//! - **`objectives`**: makespan, completion, tardiness and lateness metrics
//! - **`improvement`**: random-swap improver with two acceptance strategies
//! - **`search`**: multi-start search over the seed rules of a shop model
//! - **`control`**: request validation and report assembly for a host UI
//!
//! # Example
//!
//! ```
//! use u_shop::control::{run, RunRequest};
//! use u_shop::dispatching::DispatchRule;
//! use u_shop::models::{Job, JobSet};
//! use u_shop::search::SearchConfig;
//! use u_shop::simulation::ShopModel;
//!
//! let jobs = JobSet::new(vec![
//!     Job::new(1, 4.0, 5.0),
//!     Job::new(2, 2.0, 3.0).with_weight(2.0),
//!     Job::new(3, 6.0, 10.0),
//! ]).unwrap();
//!
//! let request = RunRequest::dispatch(ShopModel::Single, DispatchRule::Spt);
//! let report = run(&request, &jobs, &SearchConfig::default()).unwrap();
//! assert_eq!(report.objectives.makespan, 12.0);
//! assert_eq!(report.objectives.total_tardiness, 3.0);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"
//! - Dueck & Scheuer (1990), "Threshold Accepting"

pub mod control;
pub mod dispatching;
pub mod error;
pub mod improvement;
pub mod models;
pub mod objectives;
pub mod search;
pub mod simulation;
pub mod validation;

pub use error::{Result, ScheduleError};
