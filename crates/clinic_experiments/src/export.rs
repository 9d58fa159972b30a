//! Result export and analysis utilities.
//!
//! Sweep results go to CSV (one row per run, parameters first) or JSON. A
//! single run's trace and per-minute timeline can be exported as well.

use std::path::Path;

use clinic_core::simulation::SimulationOutcome;
use serde::Serialize;

use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;
use crate::sensitivity::RatePoint;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export any serializable result list as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json<T: Serialize>(
    results: &[T],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}

/// Export simulation results with parameters to CSV format.
///
/// Parameters and results are paired by index (results[i] corresponds to
/// parameter_sets[i]).
///
/// # Errors
///
/// Returns an error if there are no results, the two slices are mismatched,
/// or file creation or CSV writing fails.
pub fn export_to_csv(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_to_csv_impl(results, parameter_sets, file)
}

/// Export one run (series, trace, districts, statistics) as a JSON object.
pub fn export_outcome_json(
    outcome: &SimulationOutcome,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(outcome, file)
}

/// Export one run's per-minute queue length and occupancy as CSV.
pub fn export_timeline_csv(
    outcome: &SimulationOutcome,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::export_timeline_csv_impl(outcome, file)
}

pub fn export_rate_points_csv(
    points: &[RatePoint],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(points)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_rate_points_csv_impl(points, file)
}

/// Index of the run with the shortest mean queue; ties keep the first.
pub fn find_lowest_queue_index(results: &[SimulationResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.mean_queue.total_cmp(&b.mean_queue))
        .map(|(index, _)| index)
}
