//! Tabular job-data boundary.
//!
//! A spreadsheet-like supplier hands over a [`JobTable`]: column labels plus
//! rows of optional numeric cells. Conversion checks the required columns up
//! front so that a missing column is reported at load time, never deep
//! inside sequencing.

use serde::{Deserialize, Serialize};

use super::{Job, JobId, JobSet};
use crate::dispatching::DispatchRule;
use crate::error::{Result, ScheduleError};

/// Job identifier column.
pub const COL_JOB_NUMBER: &str = "Job Number";
/// Processing time column.
pub const COL_PROCESS_TIME: &str = "process time";
/// Due date column.
pub const COL_DUE_DATE: &str = "due date";
/// Weight column.
pub const COL_WEIGHT: &str = "weight";
/// Release date column (ERD only).
pub const COL_RELEASE_DATE: &str = "release date";

/// Raw job table as delivered by a data supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTable {
    /// Column labels. Surrounding whitespace is ignored.
    pub columns: Vec<String>,
    /// Rows of cells, aligned with `columns`. `None` is an empty cell.
    pub rows: Vec<Vec<Option<f64>>>,
}

struct ColumnMap {
    id: usize,
    process_time: usize,
    due_date: usize,
    weight: usize,
    release_date: Option<usize>,
}

impl JobTable {
    /// Creates a table from column labels.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn with_row(mut self, row: Vec<Option<f64>>) -> Self {
        self.rows.push(row);
        self
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }

    fn resolve_columns(&self, rule: Option<DispatchRule>) -> Result<ColumnMap> {
        let mut required = vec![COL_JOB_NUMBER, COL_PROCESS_TIME, COL_DUE_DATE, COL_WEIGHT];
        if rule == Some(DispatchRule::Erd) {
            required.push(COL_RELEASE_DATE);
        }

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| self.column(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ScheduleError::missing(
                missing.join(", "),
                "job table is missing required columns",
            ));
        }

        let index = |name: &str| self.column(name).unwrap_or_default();
        Ok(ColumnMap {
            id: index(COL_JOB_NUMBER),
            process_time: index(COL_PROCESS_TIME),
            due_date: index(COL_DUE_DATE),
            weight: index(COL_WEIGHT),
            release_date: self.column(COL_RELEASE_DATE),
        })
    }

    /// Converts the table into a validated job set.
    ///
    /// `rule` is the dispatching rule the caller intends to use; ERD makes
    /// the release-date column mandatory. Empty weight cells default to 1.
    pub fn to_job_set(&self, rule: Option<DispatchRule>) -> Result<JobSet> {
        let cols = self.resolve_columns(rule)?;
        let mut jobs = Vec::with_capacity(self.rows.len());

        for (r, row) in self.rows.iter().enumerate() {
            let cell = |i: usize| row.get(i).copied().flatten();
            let required = |i: usize, name: &str| {
                cell(i).ok_or_else(|| {
                    ScheduleError::missing(name, format!("row {} has an empty cell", r + 1))
                })
            };

            let raw_id = required(cols.id, COL_JOB_NUMBER)?;
            if raw_id < 0.0 || raw_id.fract() != 0.0 || raw_id > u32::MAX as f64 {
                return Err(ScheduleError::missing(
                    COL_JOB_NUMBER,
                    format!("row {} has non-integer job number {raw_id}", r + 1),
                ));
            }

            let mut job = Job::new(
                JobId(raw_id as u32),
                required(cols.process_time, COL_PROCESS_TIME)?,
                required(cols.due_date, COL_DUE_DATE)?,
            );
            if let Some(weight) = cell(cols.weight) {
                job = job.with_weight(weight);
            }
            if let Some(release) = cols.release_date.and_then(cell) {
                job = job.with_release_date(release);
            }
            jobs.push(job);
        }

        JobSet::new(jobs)
    }
}
