//! Metrics extraction from finished clinic runs.
//!
//! Flattens a [`SimulationOutcome`] into one row of scalars so a sweep can be
//! compared, ranked and exported.

use clinic_core::simulation::SimulationOutcome;
use serde::Serialize;

use crate::parameters::ParameterSet;

/// Aggregated metrics from a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub experiment_id: String,
    pub run_id: usize,
    pub seed: u64,
    /// Arrival rate in patients per hour.
    pub lambda_rate: f64,
    pub num_doctors: usize,
    pub service_distribution: String,
    pub mean_service_time: f64,
    /// Horizon in minutes.
    pub simulation_time: u32,
    /// Patients who entered the clinic.
    pub patients_arrived: usize,
    /// Patients whose consultation finished.
    pub patients_served: usize,
    /// Patients still queued when the event list ran dry.
    pub still_waiting: usize,
    /// Mean of the per-minute waiting-line length.
    pub mean_queue: f64,
    pub max_queue: usize,
    pub mean_wait: f64,
    pub median_wait: f64,
    pub p90_wait: f64,
    pub mean_consultation: f64,
    pub mean_time_in_clinic: f64,
    /// Mean per-minute doctor occupancy in percent.
    pub mean_occupancy: f64,
}

impl SimulationResult {
    /// Mean, median and 90th percentile of a sample; zeros when empty.
    fn calculate_stats(values: &[f64]) -> (f64, f64, f64) {
        if values.is_empty() {
            return (0.0, 0.0, 0.0);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        let avg = sorted.iter().sum::<f64>() / len as f64;
        let median = if len % 2 == 0 {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        } else {
            sorted[len / 2]
        };
        let p90_idx = ((len - 1) as f64 * 0.9) as usize;
        let p90 = sorted[p90_idx.min(len - 1)];

        (avg, median, p90)
    }

    /// Share of arrivals that were fully served, 0 when nobody arrived.
    pub fn service_rate(&self) -> f64 {
        if self.patients_arrived == 0 {
            0.0
        } else {
            self.patients_served as f64 / self.patients_arrived as f64
        }
    }
}

/// Build the metrics row for one run of `param_set`.
pub fn extract_metrics(param_set: &ParameterSet, outcome: &SimulationOutcome) -> SimulationResult {
    let params = &param_set.params;
    let (_, median_wait, p90_wait) = SimulationResult::calculate_stats(&outcome.wait_samples());
    let stats = &outcome.stats;

    SimulationResult {
        experiment_id: param_set.experiment_id.clone(),
        run_id: param_set.run_id,
        seed: param_set.seed,
        lambda_rate: params.lambda_rate,
        num_doctors: params.num_doctors,
        service_distribution: params.service_distribution.as_str().to_string(),
        mean_service_time: params.mean_service_time,
        simulation_time: params.simulation_time,
        patients_arrived: outcome.counts.arrivals,
        patients_served: stats.patients_served,
        still_waiting: outcome.counts.still_waiting,
        mean_queue: stats.mean_queue,
        max_queue: stats.max_queue,
        mean_wait: stats.mean_wait,
        median_wait,
        p90_wait,
        mean_consultation: stats.mean_consultation,
        mean_time_in_clinic: stats.mean_time_in_clinic,
        mean_occupancy: stats.mean_occupancy,
    }
}
