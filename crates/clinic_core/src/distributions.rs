//! Probability distributions for arrival gaps and consultation durations.
//!
//! All sampling goes through the caller's generator so that a run seeded once
//! at reset reproduces every draw.

use std::fmt;

use rand::RngCore;
use rand_distr::{Distribution, Exp, Normal, Uniform};
use serde::{Deserialize, Serialize};

/// Lower bound for normally distributed consultation durations (minutes).
pub const MIN_NORMAL_DURATION: f64 = 0.1;

/// Trait for sampling inter-arrival gaps in simulated minutes.
pub trait InterArrivalDistribution: Send + Sync + fmt::Debug {
    /// Sample the gap until the next arrival. Returns `f64::INFINITY` when the
    /// process never fires.
    fn sample_minutes(&self, rng: &mut dyn RngCore) -> f64;
}

/// Exponential gaps: a Poisson arrival process with a constant hourly rate.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialInterArrival {
    /// Expected arrivals per hour (lambda).
    pub rate_per_hour: f64,
}

impl ExponentialInterArrival {
    pub fn new(rate_per_hour: f64) -> Self {
        Self { rate_per_hour }
    }

    pub fn rate_per_minute(&self) -> f64 {
        self.rate_per_hour / 60.0
    }
}

impl InterArrivalDistribution for ExponentialInterArrival {
    fn sample_minutes(&self, rng: &mut dyn RngCore) -> f64 {
        let rate = self.rate_per_minute();
        if rate <= 0.0 || !rate.is_finite() {
            return f64::INFINITY;
        }
        match Exp::new(rate) {
            Ok(exp) => exp.sample(rng),
            Err(_) => f64::INFINITY,
        }
    }
}

/// Family of the consultation-duration distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceDistribution {
    /// Exponential with scale = mean.
    #[default]
    Exponential,
    /// Normal with stddev = 0.2 × mean, clamped to [MIN_NORMAL_DURATION].
    Normal,
    /// Uniform on [0.5 × mean, 1.5 × mean).
    Uniform,
}

impl ServiceDistribution {
    /// Parse a family name. Unrecognised names fall back to exponential.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "exponential" | "exponencial" => ServiceDistribution::Exponential,
            "normal" => ServiceDistribution::Normal,
            "uniform" | "uniforme" => ServiceDistribution::Uniform,
            other => {
                tracing::warn!(
                    distribution = other,
                    "unknown service distribution, using exponential"
                );
                ServiceDistribution::Exponential
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceDistribution::Exponential => "exponential",
            ServiceDistribution::Normal => "normal",
            ServiceDistribution::Uniform => "uniform",
        }
    }

    /// Draw one consultation duration in minutes for the given mean.
    pub fn sample_minutes(self, mean: f64, rng: &mut dyn RngCore) -> f64 {
        if mean <= 0.0 || !mean.is_finite() {
            return match self {
                ServiceDistribution::Normal => MIN_NORMAL_DURATION,
                _ => 0.0,
            };
        }
        match self {
            ServiceDistribution::Exponential => match Exp::new(1.0 / mean) {
                Ok(exp) => exp.sample(rng),
                Err(_) => mean,
            },
            ServiceDistribution::Normal => match Normal::new(mean, 0.2 * mean) {
                Ok(normal) => normal.sample(rng).max(MIN_NORMAL_DURATION),
                Err(_) => mean,
            },
            ServiceDistribution::Uniform if (1.5 * mean).is_finite() => {
                Uniform::new(0.5 * mean, 1.5 * mean).sample(rng)
            }
            ServiceDistribution::Uniform => mean,
        }
    }

    /// Whether every distribution can sample around `mean` without overflowing
    /// its bounds.
    pub fn accepts_mean(mean: f64) -> bool {
        mean > 0.0 && (1.5 * mean).is_finite()
    }
}

impl fmt::Display for ServiceDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
