//! Parameter variation framework for exploring the clinic's parameter space.
//!
//! A [`ParameterSpace`] lists the values to explore per dimension; unspecified
//! dimensions keep the base configuration's value. Grid search produces the
//! Cartesian product, random sampling draws unique combinations from it.

use std::collections::HashSet;

use clinic_core::distributions::ServiceDistribution;
use clinic_core::scenario::ClinicParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED_STRIDE: u64 = 0x9e37_79b9;

/// A single parameter configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Engine parameters (seed applied separately).
    pub params: ClinicParams,
    /// Identifier shared by all replications of one combination.
    pub experiment_id: String,
    /// Replication index within the experiment.
    pub run_id: usize,
    pub seed: u64,
}

impl ParameterSet {
    pub fn new(params: ClinicParams, experiment_id: String, run_id: usize, seed: u64) -> Self {
        Self {
            params,
            experiment_id,
            run_id,
            seed,
        }
    }

    /// Engine parameters with this run's seed applied.
    pub fn clinic_params(&self) -> ClinicParams {
        self.params.clone().with_seed(self.seed)
    }
}

#[derive(Debug, Clone, Copy)]
struct Combination {
    lambda_rate: f64,
    num_doctors: usize,
    service_distribution: ServiceDistribution,
    mean_service_time: f64,
}

/// Defines a parameter space for exploration.
#[derive(Debug, Clone)]
pub struct ParameterSpace {
    base: ClinicParams,
    lambda_rates: Vec<f64>,
    num_doctors: Vec<usize>,
    service_distributions: Vec<ServiceDistribution>,
    mean_service_times: Vec<f64>,
    replications: usize,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self {
            base: ClinicParams::default(),
            lambda_rates: vec![],
            num_doctors: vec![],
            service_distributions: vec![],
            mean_service_times: vec![],
            replications: 1,
        }
    }

    /// Create a new parameter space for grid search.
    pub fn grid() -> Self {
        Self::new()
    }

    /// Arrival rates (patients per hour) to explore.
    pub fn lambda_rate(mut self, rates: Vec<f64>) -> Self {
        self.lambda_rates = rates;
        self
    }

    pub fn num_doctors(mut self, counts: Vec<usize>) -> Self {
        self.num_doctors = counts;
        self
    }

    pub fn service_distribution(mut self, distributions: Vec<ServiceDistribution>) -> Self {
        self.service_distributions = distributions;
        self
    }

    pub fn mean_service_time(mut self, means: Vec<f64>) -> Self {
        self.mean_service_times = means;
        self
    }

    /// Number of seeded runs per combination (at least one).
    pub fn replications(mut self, count: usize) -> Self {
        self.replications = count.max(1);
        self
    }

    /// Base parameters used for every dimension not being varied.
    pub fn with_base(mut self, base: ClinicParams) -> Self {
        self.base = base;
        self
    }

    pub fn base(&self) -> &ClinicParams {
        &self.base
    }

    fn values<T: Copy>(explored: &[T], fallback: T) -> Vec<T> {
        if explored.is_empty() {
            vec![fallback]
        } else {
            explored.to_vec()
        }
    }

    fn combinations(&self) -> Vec<Combination> {
        let rates = Self::values(&self.lambda_rates, self.base.lambda_rate);
        let doctors = Self::values(&self.num_doctors, self.base.num_doctors);
        let distributions =
            Self::values(&self.service_distributions, self.base.service_distribution);
        let means = Self::values(&self.mean_service_times, self.base.mean_service_time);
        let (doctors, distributions, means) = (&doctors, &distributions, &means);

        rates
            .iter()
            .flat_map(|&lambda_rate| {
                doctors.iter().flat_map(move |&num_doctors| {
                    distributions.iter().flat_map(move |&service_distribution| {
                        means.iter().map(move |&mean_service_time| Combination {
                            lambda_rate,
                            num_doctors,
                            service_distribution,
                            mean_service_time,
                        })
                    })
                })
            })
            .collect()
    }

    /// Seeds depend on the replication only, so every combination sees the
    /// same random streams and differences come from the parameters.
    fn seed_for(&self, run_id: usize) -> u64 {
        self.base
            .seed
            .unwrap_or(0)
            .wrapping_add((run_id as u64 + 1).wrapping_mul(SEED_STRIDE))
    }

    fn to_parameter_set(&self, combo: Combination, experiment_id: usize, run_id: usize) -> ParameterSet {
        let params = self
            .base
            .clone()
            .with_lambda_rate(combo.lambda_rate)
            .with_num_doctors(combo.num_doctors)
            .with_service(combo.service_distribution, combo.mean_service_time);
        ParameterSet::new(
            params,
            format!("exp_{experiment_id}"),
            run_id,
            self.seed_for(run_id),
        )
    }

    /// Generate all parameter sets using grid search (Cartesian product),
    /// `replications` runs per combination.
    pub fn generate(&self) -> Vec<ParameterSet> {
        self.combinations()
            .into_iter()
            .enumerate()
            .flat_map(|(experiment_id, combo)| {
                (0..self.replications)
                    .map(move |run_id| self.to_parameter_set(combo, experiment_id, run_id))
            })
            .collect()
    }

    /// Draw up to `count` distinct combinations at random (Monte Carlo
    /// sampling). Returns fewer sets when the space has fewer combinations.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        let combinations = self.combinations();
        let target = count.min(combinations.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = HashSet::new();
        let mut parameter_sets = Vec::with_capacity(target);

        while seen.len() < target {
            let index = rng.gen_range(0..combinations.len());
            if seen.insert(index) {
                parameter_sets.push(self.to_parameter_set(combinations[index], index, 0));
            }
        }
        parameter_sets
    }
}

impl Default for ParameterSpace {
    fn default() -> Self {
        Self::new()
    }
}
