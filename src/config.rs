//! Run configuration: progress cadence, an optional step bound, and a preallocation hint.

use crate::types::{MachineError, DEFAULT_REPORT_INTERVAL};
use serde::{Deserialize, Serialize};

/// Options for a single run. None of them change the simulation's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Invoke the progress callback every this many steps. Must be a power of two.
    /// `None` disables progress reports.
    pub report_interval: Option<u64>,
    /// Stop with `MachineError::StepLimitReached` after this many steps without halting.
    pub step_limit: Option<u64>,
    /// Cells to reserve up front.
    pub preallocate: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            report_interval: Some(DEFAULT_REPORT_INTERVAL),
            step_limit: None,
            preallocate: 0,
        }
    }
}

impl RunConfig {
    /// Checks the configuration and returns the progress mask to test the step counter against.
    ///
    /// A report is due whenever `steps & mask == 0`. `None` means no reports.
    pub fn validate(&self) -> Result<Option<u64>, MachineError> {
        match self.report_interval {
            None => Ok(None),
            Some(interval) if interval.is_power_of_two() => Ok(Some(interval - 1)),
            Some(interval) => Err(MachineError::InvalidConfig(format!(
                "report interval must be a power of two, got {}",
                interval
            ))),
        }
    }

    pub fn with_report_interval(mut self, interval: Option<u64>) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn with_step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    pub fn with_preallocate(mut self, cells: usize) -> Self {
        self.preallocate = cells;
        self
    }
}
