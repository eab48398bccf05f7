//! Harness Module
//!
//! Drives a [`Store`](crate::Store) the way an external consumer would:
//! acceptance scenarios with PASS/FAIL outcomes, and a sequential insert
//! throughput benchmark.

mod bench;
mod scenarios;

use std::io::ErrorKind;
use std::path::Path;

use crate::error::Result;

pub use bench::{random_string, run_benchmark, BenchmarkOptions, BenchmarkReport};
pub use scenarios::{run_scenarios, Outcome, ScenarioResult, SCENARIOS};

/// Remove a backing file, treating a missing file as success
pub fn remove_data_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
