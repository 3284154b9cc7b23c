// src/io/reporting.rs

use std::error::Error;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::analysis::optimization::PolicyGridRow;
use crate::simulation::engine::ReplicationResult;

/// Writes the per-replication table of a Monte Carlo batch to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/mc_runs.csv").
/// * `data` - The replication records from the Monte Carlo harness.
pub fn write_replication_log(
    file_path: &str,
    data: &[ReplicationResult],
) -> Result<(), Box<dyn Error>> {
    write_csv(file_path, data)
}

/// Writes an evaluated policy grid to a CSV file, one row per (s,S) pair.
pub fn write_policy_grid(file_path: &str, data: &[PolicyGridRow]) -> Result<(), Box<dyn Error>> {
    write_csv(file_path, data)
}

fn write_csv<T: Serialize>(file_path: &str, data: &[T]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);
    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    debug!(rows = data.len(), file_path, "exported CSV");
    Ok(())
}
