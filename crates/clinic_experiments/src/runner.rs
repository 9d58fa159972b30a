//! Parallel simulation execution using rayon.
//!
//! Every run owns its engine and roster copy; nothing is shared between
//! threads except the read-only roster slice.

use clinic_core::patient::PatientRecord;
use clinic_core::simulation::{ClinicSimulation, SimulationOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::ThreadPoolBuildError;
use tracing::{debug, info};

use crate::metrics::{extract_metrics, SimulationResult};
use crate::parameters::ParameterSet;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";

/// Run one parameter set against `patients` and return the full outcome.
pub fn run_single_outcome(param_set: &ParameterSet, patients: &[PatientRecord]) -> SimulationOutcome {
    ClinicSimulation::new(param_set.clinic_params(), patients.to_vec()).run()
}

/// Run one parameter set and reduce the outcome to a metrics row.
pub fn run_single_simulation(param_set: &ParameterSet, patients: &[PatientRecord]) -> SimulationResult {
    let outcome = run_single_outcome(param_set, patients);
    let result = extract_metrics(param_set, &outcome);
    debug!(
        experiment = %param_set.experiment_id,
        run = param_set.run_id,
        lambda_rate = result.lambda_rate,
        mean_queue = result.mean_queue,
        "experiment run finished"
    );
    result
}

/// Run multiple simulations in parallel with a progress bar.
///
/// Results come back in the same order as `parameter_sets`.
pub fn run_parallel_experiments(
    parameter_sets: Vec<ParameterSet>,
    patients: &[PatientRecord],
    num_threads: Option<usize>,
) -> Result<Vec<SimulationResult>, ThreadPoolBuildError> {
    run_parallel_experiments_with_progress(parameter_sets, patients, num_threads, true)
}

/// Run multiple simulations in parallel with optional progress bar.
///
/// `num_threads` of `None` uses rayon's default (one per core).
pub fn run_parallel_experiments_with_progress(
    parameter_sets: Vec<ParameterSet>,
    patients: &[PatientRecord],
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SimulationResult>, ThreadPoolBuildError> {
    let total = parameter_sets.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    info!(runs = total, threads = pool.current_num_threads(), "starting sweep");
    let results = pool.install(|| {
        parameter_sets
            .par_iter()
            .map(|param_set| {
                let result = run_single_simulation(param_set, patients);
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    Ok(results)
}
