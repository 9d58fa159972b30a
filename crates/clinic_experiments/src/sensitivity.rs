//! Arrival-rate sensitivity: how the mean waiting line grows with demand.

use clinic_core::arrivals::ArrivalPattern;
use clinic_core::distributions::ServiceDistribution;
use clinic_core::patient::PatientRecord;
use clinic_core::scenario::ClinicParams;
use rayon::ThreadPoolBuildError;
use serde::Serialize;

use crate::parameters::ParameterSpace;
use crate::runner::run_parallel_experiments_with_progress;

/// Arrival rates (patients per hour) swept when none are given.
pub const DEFAULT_SWEEP_RATES: [f64; 5] = [10.0, 15.0, 20.0, 25.0, 30.0];

/// Horizon used by every sensitivity run, in minutes.
pub const SENSITIVITY_SIMULATION_TIME: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePoint {
    pub lambda_rate: f64,
    pub mean_queue: f64,
}

/// Parameter space for a rate sweep: staffing, specialties, mean service
/// time and seed come from `base`; service is exponential, arrivals are
/// homogeneous and the horizon is [`SENSITIVITY_SIMULATION_TIME`].
pub fn rate_sensitivity_space(base: &ClinicParams, rates: &[f64]) -> ParameterSpace {
    let rates = if rates.is_empty() {
        DEFAULT_SWEEP_RATES.to_vec()
    } else {
        rates.to_vec()
    };
    let sweep_base = base
        .clone()
        .with_service(ServiceDistribution::Exponential, base.mean_service_time)
        .with_arrival_pattern(ArrivalPattern::Homogeneous)
        .with_simulation_time(SENSITIVITY_SIMULATION_TIME);
    ParameterSpace::grid().with_base(sweep_base).lambda_rate(rates)
}

/// Run one simulation per rate and report the mean per-minute queue length.
pub fn run_rate_sensitivity(
    base: &ClinicParams,
    rates: &[f64],
    patients: &[PatientRecord],
    show_progress: bool,
) -> Result<Vec<RatePoint>, ThreadPoolBuildError> {
    let sets = rate_sensitivity_space(base, rates).generate();
    let results = run_parallel_experiments_with_progress(sets, patients, None, show_progress)?;
    Ok(results
        .into_iter()
        .map(|result| RatePoint {
            lambda_rate: result.lambda_rate,
            mean_queue: result.mean_queue,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::routing::Specialty;
    use clinic_core::test_helpers::roster;

    #[test]
    fn test_space_overrides_run_shape_and_keeps_staffing() {
        let base = ClinicParams::default()
            .with_num_doctors(5)
            .with_doctor_specialty(1, Specialty::Cardiology)
            .with_service(ServiceDistribution::Uniform, 20.0)
            .with_arrival_blocks(vec![]);
        let sets = rate_sensitivity_space(&base, &[]).generate();

        assert_eq!(sets.len(), DEFAULT_SWEEP_RATES.len());
        for (set, rate) in sets.iter().zip(DEFAULT_SWEEP_RATES) {
            assert_eq!(set.params.lambda_rate, rate);
            assert_eq!(set.params.num_doctors, 5);
            assert_eq!(set.params.mean_service_time, 20.0);
            assert_eq!(set.params.service_distribution, ServiceDistribution::Exponential);
            assert_eq!(set.params.arrival_pattern, ArrivalPattern::Homogeneous);
            assert_eq!(set.params.simulation_time, SENSITIVITY_SIMULATION_TIME);
            assert_eq!(set.params.resolved_specialties()[1], Specialty::Cardiology);
        }
    }

    #[test]
    fn test_heavier_demand_grows_the_queue() {
        let base = ClinicParams::default().with_num_doctors(2).with_seed(3);
        let points = run_rate_sensitivity(&base, &[2.0, 60.0], &roster(600), false).expect("pool");

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].lambda_rate, 2.0);
        assert!(points[1].mean_queue > points[0].mean_queue);
    }
}
