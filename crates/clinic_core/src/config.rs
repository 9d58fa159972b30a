//! File configuration (`config.json`) and its conversion into engine params.
//!
//! Every key is optional; missing keys take the application defaults below.
//! Command-line overrides are applied on top by the binary before
//! [ClinicConfig::validate] runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::arrivals::{ArrivalBlock, ArrivalPattern};
use crate::distributions::ServiceDistribution;
use crate::error::ConfigError;
use crate::routing::{Specialty, FALLBACK_SPECIALTY};
use crate::scenario::ClinicParams;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DATASET_FILE: &str = "pessoas.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub lambda_rate: f64,
    pub num_doctors: usize,
    pub service_distribution: String,
    pub mean_service_time: f64,
    pub simulation_time: u32,
    pub arrival_pattern: String,
    /// Explicit blocks for the piecewise pattern; the built-in profile otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_profile: Option<Vec<ArrivalBlock>>,
    pub dataset_file: PathBuf,
    /// Doctor index (as a string key) to specialty name.
    pub doctor_specialties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Keep at most this many patients after shuffling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            lambda_rate: 10.0,
            num_doctors: 3,
            service_distribution: "exponential".to_string(),
            mean_service_time: 15.0,
            simulation_time: 120,
            arrival_pattern: "homogeneous".to_string(),
            arrival_profile: None,
            dataset_file: PathBuf::from(DEFAULT_DATASET_FILE),
            doctor_specialties: BTreeMap::new(),
            seed: None,
            limit: None,
        }
    }
}

impl ClinicConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists; a missing or broken file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "config loaded");
                config
            }
            Err(err) => {
                tracing::warn!(error = %err, "config unusable, using defaults");
                Self::default()
            }
        }
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lambda_rate.is_finite() || self.lambda_rate < 0.0 {
            return Err(ConfigError::invalid(
                "lambda_rate",
                format!("must be a finite non-negative number, got {}", self.lambda_rate),
            ));
        }
        if self.num_doctors == 0 {
            return Err(ConfigError::invalid("num_doctors", "must be at least 1"));
        }
        if !ServiceDistribution::accepts_mean(self.mean_service_time) {
            return Err(ConfigError::invalid(
                "mean_service_time",
                format!("must be a positive finite number, got {}", self.mean_service_time),
            ));
        }
        if self.simulation_time == 0 {
            return Err(ConfigError::invalid("simulation_time", "must be at least 1 minute"));
        }
        for key in self.doctor_specialties.keys() {
            if key.trim().parse::<usize>().is_err() {
                return Err(ConfigError::invalid(
                    "doctor_specialties",
                    format!("doctor index '{key}' is not a non-negative integer"),
                ));
            }
        }
        if let Some(blocks) = &self.arrival_profile {
            let bad = blocks.iter().find(|b| {
                !b.start_minute.is_finite()
                    || !b.end_minute.is_finite()
                    || !b.rate_per_hour.is_finite()
                    || b.rate_per_hour < 0.0
            });
            if let Some(block) = bad {
                return Err(ConfigError::invalid(
                    "arrival_profile",
                    format!("block {block:?} has a non-finite bound or negative rate"),
                ));
            }
        }
        Ok(())
    }

    /// Doctor index to specialty. Unknown names fall back to general practice.
    pub fn resolved_doctor_specialties(&self) -> BTreeMap<usize, Specialty> {
        self.doctor_specialties
            .iter()
            .filter_map(|(key, name)| {
                let index = key.trim().parse::<usize>().ok()?;
                let specialty = name.parse::<Specialty>().unwrap_or_else(|err| {
                    tracing::warn!(doctor = index, error = %err, "using clinica_geral");
                    FALLBACK_SPECIALTY
                });
                Some((index, specialty))
            })
            .collect()
    }

    pub fn to_params(&self) -> ClinicParams {
        let arrival_pattern = match ArrivalPattern::from_name(&self.arrival_pattern) {
            ArrivalPattern::Piecewise(_) => ArrivalPattern::Piecewise(self.arrival_profile.clone()),
            ArrivalPattern::Homogeneous => ArrivalPattern::Homogeneous,
        };
        ClinicParams {
            lambda_rate: self.lambda_rate,
            num_doctors: self.num_doctors,
            doctor_specialties: self.resolved_doctor_specialties(),
            service_distribution: ServiceDistribution::from_name(&self.service_distribution),
            mean_service_time: self.mean_service_time,
            simulation_time: self.simulation_time,
            arrival_pattern,
            seed: self.seed,
        }
    }
}
