//! Arrival generation: turns a roster size and an arrival pattern into ordered
//! arrival timestamps inside `[0, simulation_time)`.
//!
//! Patients are assigned to timestamps in roster order, each at most once.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::distributions::{ExponentialInterArrival, InterArrivalDistribution};
use crate::patient::PatientId;

/// One block of a piecewise-constant arrival rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrivalBlock {
    pub start_minute: f64,
    pub end_minute: f64,
    /// Expected arrivals per hour inside the block.
    pub rate_per_hour: f64,
}

impl ArrivalBlock {
    pub fn new(start_minute: f64, end_minute: f64, rate_per_hour: f64) -> Self {
        Self {
            start_minute,
            end_minute,
            rate_per_hour,
        }
    }
}

/// How arrival times are spread over the horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArrivalPattern {
    /// Poisson process at the run's single arrival rate.
    #[default]
    Homogeneous,
    /// Piecewise-constant rates. `None` uses [default_profile].
    Piecewise(Option<Vec<ArrivalBlock>>),
}

impl ArrivalPattern {
    /// Parse a pattern name; anything unrecognised is homogeneous.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "nao homogeneo" | "não homogéneo" | "nonhomogeneous" | "non-homogeneous"
            | "piecewise" => ArrivalPattern::Piecewise(None),
            _ => ArrivalPattern::Homogeneous,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArrivalPattern::Homogeneous => "homogeneous",
            ArrivalPattern::Piecewise(_) => "piecewise",
        }
    }
}

/// Morning-quiet, midday-peak profile used when no blocks are given.
pub fn default_profile(simulation_time: u32) -> Vec<ArrivalBlock> {
    vec![
        ArrivalBlock::new(0.0, 120.0, 5.0),
        ArrivalBlock::new(120.0, 300.0, 15.0),
        ArrivalBlock::new(300.0, 420.0, 25.0),
        ArrivalBlock::new(420.0, f64::from(simulation_time), 10.0),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledArrival {
    pub time: f64,
    pub patient: PatientId,
}

/// Generate arrivals for up to `patient_count` patients, in increasing time.
pub fn generate_arrivals(
    pattern: &ArrivalPattern,
    rate_per_hour: f64,
    simulation_time: u32,
    patient_count: usize,
    rng: &mut dyn RngCore,
) -> Vec<ScheduledArrival> {
    if patient_count == 0 {
        return Vec::new();
    }
    match pattern {
        ArrivalPattern::Homogeneous => {
            homogeneous_arrivals(rate_per_hour, simulation_time, patient_count, rng)
        }
        ArrivalPattern::Piecewise(blocks) => {
            let fallback;
            let blocks = match blocks {
                Some(blocks) => blocks.as_slice(),
                None => {
                    fallback = default_profile(simulation_time);
                    fallback.as_slice()
                }
            };
            piecewise_arrivals(blocks, simulation_time, patient_count, rng)
        }
    }
}

fn homogeneous_arrivals(
    rate_per_hour: f64,
    simulation_time: u32,
    patient_count: usize,
    rng: &mut dyn RngCore,
) -> Vec<ScheduledArrival> {
    let horizon = f64::from(simulation_time);
    let gaps = ExponentialInterArrival::new(rate_per_hour);
    let mut arrivals = Vec::new();
    let mut t = gaps.sample_minutes(rng);
    while t < horizon && arrivals.len() < patient_count {
        arrivals.push(ScheduledArrival {
            time: t,
            patient: PatientId(arrivals.len()),
        });
        t += gaps.sample_minutes(rng);
    }
    arrivals
}

fn piecewise_arrivals(
    blocks: &[ArrivalBlock],
    simulation_time: u32,
    patient_count: usize,
    rng: &mut dyn RngCore,
) -> Vec<ScheduledArrival> {
    let horizon = f64::from(simulation_time);
    let mut arrivals = Vec::new();
    for block in blocks {
        let start = block.start_minute.max(0.0);
        let end = block.end_minute.min(horizon);
        if end <= start || block.rate_per_hour <= 0.0 {
            continue;
        }
        let gaps = ExponentialInterArrival::new(block.rate_per_hour);
        let mut t = start;
        while t < end && arrivals.len() < patient_count {
            t += gaps.sample_minutes(rng);
            if t < end && arrivals.len() < patient_count {
                arrivals.push(ScheduledArrival {
                    time: t,
                    patient: PatientId(arrivals.len()),
                });
            }
        }
    }
    arrivals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn homogeneous_arrivals_are_ordered_and_inside_horizon() {
        let mut rng = StdRng::seed_from_u64(1);
        let arrivals = generate_arrivals(&ArrivalPattern::Homogeneous, 30.0, 240, 500, &mut rng);
        assert!(!arrivals.is_empty());
        assert!(arrivals.windows(2).all(|w| w[0].time <= w[1].time));
        assert!(arrivals.iter().all(|a| (0.0..240.0).contains(&a.time)));
        for (i, arrival) in arrivals.iter().enumerate() {
            assert_eq!(arrival.patient, PatientId(i));
        }
    }

    #[test]
    fn roster_size_caps_arrivals() {
        let mut rng = StdRng::seed_from_u64(2);
        let arrivals = generate_arrivals(&ArrivalPattern::Homogeneous, 600.0, 480, 7, &mut rng);
        assert_eq!(arrivals.len(), 7);
    }

    #[test]
    fn zero_rate_or_empty_roster_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_arrivals(&ArrivalPattern::Homogeneous, 0.0, 480, 10, &mut rng).is_empty());
        assert!(generate_arrivals(&ArrivalPattern::Homogeneous, 10.0, 480, 0, &mut rng).is_empty());
    }

    #[test]
    fn piecewise_blocks_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let pattern = ArrivalPattern::Piecewise(Some(vec![
            ArrivalBlock::new(0.0, 60.0, 0.0),
            ArrivalBlock::new(60.0, 120.0, 30.0),
        ]));
        let arrivals = generate_arrivals(&pattern, 10.0, 480, 1_000, &mut rng);
        assert!(!arrivals.is_empty());
        assert!(arrivals.iter().all(|a| (60.0..120.0).contains(&a.time)));
    }

    #[test]
    fn blocks_past_the_horizon_are_clipped() {
        let mut rng = StdRng::seed_from_u64(5);
        let pattern = ArrivalPattern::Piecewise(Some(vec![ArrivalBlock::new(0.0, 1_000.0, 60.0)]));
        let arrivals = generate_arrivals(&pattern, 10.0, 100, 10_000, &mut rng);
        assert!(arrivals.iter().all(|a| a.time < 100.0));
    }

    #[test]
    fn default_profile_ends_at_horizon() {
        let profile = default_profile(600);
        assert_eq!(profile.len(), 4);
        assert_eq!(profile[3].end_minute, 600.0);
        assert_eq!(profile[2].rate_per_hour, 25.0);
    }

    #[test]
    fn pattern_names() {
        assert_eq!(ArrivalPattern::from_name("homogeneo"), ArrivalPattern::Homogeneous);
        assert_eq!(
            ArrivalPattern::from_name("Nao Homogeneo"),
            ArrivalPattern::Piecewise(None)
        );
        assert_eq!(
            ArrivalPattern::from_name("piecewise"),
            ArrivalPattern::Piecewise(None)
        );
        assert_eq!(ArrivalPattern::from_name("bursty"), ArrivalPattern::Homogeneous);
    }
}
