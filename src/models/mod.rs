//! Scheduling domain models.
//!
//! Provides the data types for shop-scheduling problems and their
//! solutions: jobs, sequences, completion records, and the tabular
//! boundary that job data arrives through.
//!
//! # Domain Mappings
//!
//! | u-shop | Manufacturing | Print shop | Data center |
//! |--------|--------------|------------|-------------|
//! | Job | Work order | Print run | Batch job |
//! | Machine | Machine/Station | Press | Worker node |
//! | Sequence | Dispatch list | Run order | Queue order |
//! | CompletionRecord | Production plan | Press schedule | Execution plan |

mod completion;
mod job;
mod sequence;
mod table;

pub use completion::{CompletionRecord, GanttBar, JobCompletion, Operation};
pub use job::{Job, JobId, JobSet, Time};
pub use sequence::Sequence;
pub use table::{
    JobTable, COL_DUE_DATE, COL_JOB_NUMBER, COL_PROCESS_TIME, COL_RELEASE_DATE, COL_WEIGHT,
};
