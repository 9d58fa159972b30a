use std::path::PathBuf;

use clap::Parser;
use clinic_core::config::{ClinicConfig, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(
    name = "clinic",
    about = "Discrete-event simulation of a walk-in medical clinic",
    long_about = "Loads config.json (if present), applies command-line overrides,\n\
                  runs one simulation over the patient dataset and prints a summary."
)]
pub struct Args {
    /// Configuration file; missing or unreadable files fall back to defaults
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Arrival rate in patients per hour
    #[arg(long)]
    pub lambda_rate: Option<f64>,

    #[arg(long)]
    pub num_doctors: Option<usize>,

    /// exponential, normal or uniform
    #[arg(long)]
    pub service_distribution: Option<String>,

    /// Mean consultation length in minutes
    #[arg(long)]
    pub mean_service_time: Option<f64>,

    /// Horizon in minutes
    #[arg(long)]
    pub simulation_time: Option<u32>,

    /// homogeneous or piecewise
    #[arg(long)]
    pub arrival_pattern: Option<String>,

    /// Patient dataset (JSON array)
    #[arg(long)]
    pub dataset_file: Option<PathBuf>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Keep at most this many patients from the dataset
    #[arg(long)]
    pub limit: Option<usize>,

    /// Assign a specialty to a doctor, e.g. `--doctor-specialty 1=cardiologia`
    #[arg(long = "doctor-specialty", value_name = "INDEX=NAME", value_parser = parse_doctor_specialty)]
    pub doctor_specialties: Vec<(usize, String)>,

    /// Write the full run (series, trace, districts, statistics) as JSON
    #[arg(long)]
    pub output_json: Option<PathBuf>,

    /// Write the per-minute queue and occupancy series as CSV
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Also run the arrival-rate sensitivity sweep
    #[arg(long)]
    pub sweep: bool,

    /// Rates for the sweep (patients per hour)
    #[arg(long, value_delimiter = ',', requires = "sweep")]
    pub sweep_rates: Vec<f64>,

    /// How many districts to list
    #[arg(long, default_value_t = 10)]
    pub top_districts: usize,

    /// Log filter, e.g. `info` or `clinic_core=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn parse_doctor_specialty(raw: &str) -> Result<(usize, String), String> {
    let (index, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=NAME, got '{raw}'"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid doctor index '{index}': {err}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing specialty name for doctor {index}"));
    }
    Ok((index, name.to_string()))
}

impl Args {
    /// Layer the flags that were given on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut ClinicConfig) {
        if let Some(rate) = self.lambda_rate {
            config.lambda_rate = rate;
        }
        if let Some(doctors) = self.num_doctors {
            config.num_doctors = doctors;
        }
        if let Some(distribution) = &self.service_distribution {
            config.service_distribution = distribution.clone();
        }
        if let Some(mean) = self.mean_service_time {
            config.mean_service_time = mean;
        }
        if let Some(minutes) = self.simulation_time {
            config.simulation_time = minutes;
        }
        if let Some(pattern) = &self.arrival_pattern {
            config.arrival_pattern = pattern.clone();
        }
        if let Some(path) = &self.dataset_file {
            config.dataset_file = path.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.limit.is_some() {
            config.limit = self.limit;
        }
        for (index, name) in &self.doctor_specialties {
            config
                .doctor_specialties
                .insert(index.to_string(), name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::routing::Specialty;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("clinic").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn no_flags_keep_the_file_values() {
        let mut config = ClinicConfig {
            lambda_rate: 22.0,
            seed: Some(4),
            ..ClinicConfig::default()
        };
        let before = config.clone();
        parse(&[]).apply_overrides(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn flags_override_the_file() {
        let args = parse(&[
            "--lambda-rate",
            "30",
            "--num-doctors",
            "5",
            "--service-distribution",
            "uniforme",
            "--simulation-time",
            "480",
            "--arrival-pattern",
            "piecewise",
            "--seed",
            "9",
            "--limit",
            "100",
            "--doctor-specialty",
            "0=cardiologia",
            "--doctor-specialty",
            "2 = geriatria",
        ]);
        let mut config = ClinicConfig::default();
        config
            .doctor_specialties
            .insert("0".into(), "ortopedia".into());
        args.apply_overrides(&mut config);

        assert_eq!(config.lambda_rate, 30.0);
        assert_eq!(config.num_doctors, 5);
        assert_eq!(config.simulation_time, 480);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.limit, Some(100));
        assert!(config.validate().is_ok());

        let params = config.to_params();
        let specialties = params.resolved_specialties();
        assert_eq!(specialties[0], Specialty::Cardiology);
        assert_eq!(specialties[2], Specialty::Geriatrics);
        assert_eq!(params.arrival_pattern.as_str(), "piecewise");
    }

    #[test]
    fn malformed_doctor_specialty_is_rejected() {
        for bad in ["cardiologia", "x=cardiologia", "1="] {
            let parsed = Args::try_parse_from(["clinic", "--doctor-specialty", bad]);
            assert!(parsed.is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn sweep_rates_need_the_sweep_flag() {
        assert!(Args::try_parse_from(["clinic", "--sweep-rates", "10,20"]).is_err());
        let args = parse(&["--sweep", "--sweep-rates", "10,20,40"]);
        assert_eq!(args.sweep_rates, vec![10.0, 20.0, 40.0]);
    }
}
