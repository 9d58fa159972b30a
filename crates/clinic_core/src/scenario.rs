//! Engine configuration for one simulation run.

use std::collections::BTreeMap;

use crate::arrivals::{ArrivalBlock, ArrivalPattern};
use crate::distributions::ServiceDistribution;
use crate::routing::{Specialty, FALLBACK_SPECIALTY};

/// Default arrival rate (patients per hour).
pub const DEFAULT_LAMBDA_RATE: f64 = 10.0;
pub const DEFAULT_NUM_DOCTORS: usize = 3;
/// Default mean consultation time (minutes).
pub const DEFAULT_MEAN_SERVICE_TIME: f64 = 15.0;
/// Default horizon: one 8-hour working day, in minutes.
pub const DEFAULT_SIMULATION_TIME: u32 = 480;

/// Parameters for a clinic run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicParams {
    /// Arrival rate in patients per hour (homogeneous pattern only).
    pub lambda_rate: f64,
    pub num_doctors: usize,
    /// Specialty per doctor index. Indices without an entry are generalists.
    pub doctor_specialties: BTreeMap<usize, Specialty>,
    pub service_distribution: ServiceDistribution,
    /// Mean consultation time in minutes.
    pub mean_service_time: f64,
    /// Horizon in whole minutes; arrivals and series cover `[0, simulation_time)`.
    pub simulation_time: u32,
    pub arrival_pattern: ArrivalPattern,
    /// Random seed for reproducibility (optional; if None, uses OS entropy).
    pub seed: Option<u64>,
}

impl Default for ClinicParams {
    fn default() -> Self {
        Self {
            lambda_rate: DEFAULT_LAMBDA_RATE,
            num_doctors: DEFAULT_NUM_DOCTORS,
            doctor_specialties: BTreeMap::new(),
            service_distribution: ServiceDistribution::default(),
            mean_service_time: DEFAULT_MEAN_SERVICE_TIME,
            simulation_time: DEFAULT_SIMULATION_TIME,
            arrival_pattern: ArrivalPattern::default(),
            seed: None,
        }
    }
}

impl ClinicParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_lambda_rate(mut self, rate_per_hour: f64) -> Self {
        self.lambda_rate = rate_per_hour;
        self
    }

    pub fn with_num_doctors(mut self, num_doctors: usize) -> Self {
        self.num_doctors = num_doctors;
        self
    }

    /// Bind doctor `index` to `specialty`.
    pub fn with_doctor_specialty(mut self, index: usize, specialty: Specialty) -> Self {
        self.doctor_specialties.insert(index, specialty);
        self
    }

    pub fn with_service(mut self, distribution: ServiceDistribution, mean_minutes: f64) -> Self {
        self.service_distribution = distribution;
        self.mean_service_time = mean_minutes;
        self
    }

    pub fn with_simulation_time(mut self, minutes: u32) -> Self {
        self.simulation_time = minutes;
        self
    }

    pub fn with_arrival_pattern(mut self, pattern: ArrivalPattern) -> Self {
        self.arrival_pattern = pattern;
        self
    }

    /// Piecewise arrivals over explicit `blocks`.
    pub fn with_arrival_blocks(mut self, blocks: Vec<ArrivalBlock>) -> Self {
        self.arrival_pattern = ArrivalPattern::Piecewise(Some(blocks));
        self
    }

    /// Specialty of every doctor slot, index `0..num_doctors`.
    pub fn resolved_specialties(&self) -> Vec<Specialty> {
        (0..self.num_doctors)
            .map(|index| {
                self.doctor_specialties
                    .get(&index)
                    .copied()
                    .unwrap_or(FALLBACK_SPECIALTY)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_doctors_are_generalists() {
        let params = ClinicParams::default()
            .with_num_doctors(3)
            .with_doctor_specialty(1, Specialty::Cardiology)
            .with_doctor_specialty(7, Specialty::Geriatrics);
        assert_eq!(
            params.resolved_specialties(),
            vec![
                Specialty::GeneralPractice,
                Specialty::Cardiology,
                Specialty::GeneralPractice
            ]
        );
    }

    #[test]
    fn builders_set_fields() {
        let params = ClinicParams::default()
            .with_seed(9)
            .with_lambda_rate(20.0)
            .with_service(ServiceDistribution::Uniform, 8.0)
            .with_simulation_time(60)
            .with_arrival_blocks(vec![ArrivalBlock::new(0.0, 60.0, 12.0)]);
        assert_eq!(params.seed, Some(9));
        assert_eq!(params.lambda_rate, 20.0);
        assert_eq!(params.service_distribution, ServiceDistribution::Uniform);
        assert_eq!(params.mean_service_time, 8.0);
        assert_eq!(params.simulation_time, 60);
        assert!(matches!(params.arrival_pattern, ArrivalPattern::Piecewise(Some(_))));
    }
}
